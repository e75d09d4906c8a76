//! Users, categories, courses and lessons

use async_trait::async_trait;
use chrono::Utc;

use academy_core::entities::{Category, Course, ForumCategory, Lesson, User, UserRole};
use academy_core::error::DomainError;
use academy_core::traits::{
    CategoryRepository, CourseRepository, ForumCategoryRepository, LessonRepository, RepoResult,
    UserRepository,
};
use academy_core::value_objects::EntityId;

use super::{newest_first, MemoryStore, Row};

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<User>> {
        Ok(self.tables.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .tables
            .lock()
            .users
            .iter()
            .find(|u| u.email.as_deref() == Some(email))
            .cloned())
    }

    async fn upsert(&self, user: &User) -> RepoResult<User> {
        let mut tables = self.tables.lock();

        if let Some(email) = user.email.as_deref() {
            let taken = tables
                .users
                .iter()
                .any(|u| u.id != user.id && u.email.as_deref() == Some(email));
            if taken {
                return Err(DomainError::EmailAlreadyExists);
            }
        }

        if let Some(existing) = tables.users.iter_mut().find(|u| u.id == user.id) {
            existing.email.clone_from(&user.email);
            existing.first_name.clone_from(&user.first_name);
            existing.last_name.clone_from(&user.last_name);
            existing.profile_image_url.clone_from(&user.profile_image_url);
            existing.updated_at = user.updated_at;
            return Ok(existing.clone());
        }

        tables.users.push(user.clone());
        Ok(user.clone())
    }

    async fn update_role(&self, id: EntityId, role: UserRole) -> RepoResult<User> {
        let mut tables = self.tables.lock();
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        user.role = role;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn set_billing_customer(&self, id: EntityId, customer_id: &str) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        user.billing_customer_id = Some(customer_id.to_string());
        user.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn create(&self, category: &Category) -> RepoResult<()> {
        self.tables.lock().categories.push(category.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Category>> {
        Ok(self.tables.lock().categories.iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self) -> RepoResult<Vec<Category>> {
        let mut categories = self.tables.lock().categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}

#[async_trait]
impl ForumCategoryRepository for MemoryStore {
    async fn create(&self, category: &ForumCategory) -> RepoResult<()> {
        self.tables.lock().forum_categories.push(category.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<ForumCategory>> {
        Ok(self
            .tables
            .lock()
            .forum_categories
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn list(&self) -> RepoResult<Vec<ForumCategory>> {
        let mut categories = self.tables.lock().forum_categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}

fn check_course_refs(tables: &super::Tables, course: &Course) -> Result<(), DomainError> {
    tables.require_user(course.instructor_id)?;
    if let Some(category_id) = course.category_id {
        if !tables.categories.iter().any(|c| c.id == category_id) {
            return Err(DomainError::CategoryNotFound(category_id));
        }
    }
    Ok(())
}

#[async_trait]
impl CourseRepository for MemoryStore {
    async fn create(&self, course: &Course) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        check_course_refs(&tables, course)?;
        tables.courses.push(Row::live(course.clone()));
        Ok(())
    }

    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Course>> {
        Ok(self.tables.lock().live_course(id).cloned())
    }

    async fn list_published(&self) -> RepoResult<Vec<Course>> {
        let tables = self.tables.lock();
        let rows = tables
            .courses
            .iter()
            .filter(|r| !r.deleted && r.value.is_published)
            .map(|r| r.value.clone());
        Ok(newest_first(rows, |c| c.created_at))
    }

    async fn find_by_instructor(&self, instructor_id: EntityId) -> RepoResult<Vec<Course>> {
        let tables = self.tables.lock();
        let rows = tables
            .courses
            .iter()
            .filter(|r| !r.deleted && r.value.instructor_id == instructor_id)
            .map(|r| r.value.clone());
        Ok(newest_first(rows, |c| c.created_at))
    }

    async fn update(&self, course: &Course) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        check_course_refs(&tables, course)?;

        let row = tables
            .courses
            .iter_mut()
            .find(|r| !r.deleted && r.value.id == course.id)
            .ok_or(DomainError::CourseNotFound(course.id))?;

        let stored = &mut row.value;
        stored.title.clone_from(&course.title);
        stored.description.clone_from(&course.description);
        stored.thumbnail.clone_from(&course.thumbnail);
        stored.price = course.price;
        stored.currency.clone_from(&course.currency);
        stored.category_id = course.category_id;
        stored.level = course.level;
        stored.duration = course.duration;
        stored.is_published = course.is_published;
        stored.updated_at = course.updated_at;
        Ok(())
    }

    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        let row = tables
            .course_row_mut(id)
            .filter(|r| !r.deleted)
            .ok_or(DomainError::CourseNotFound(id))?;
        row.deleted = true;
        Ok(())
    }
}

fn order_taken(tables: &super::Tables, lesson: &Lesson) -> bool {
    tables
        .live_lessons(lesson.course_id)
        .any(|l| l.id != lesson.id && l.order == lesson.order)
}

#[async_trait]
impl LessonRepository for MemoryStore {
    async fn create(&self, lesson: &Lesson) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        if tables.course_row_mut(lesson.course_id).is_none() {
            return Err(DomainError::CourseNotFound(lesson.course_id));
        }
        if order_taken(&tables, lesson) {
            return Err(DomainError::LessonOrderTaken(lesson.order));
        }
        tables.lessons.push(Row::live(lesson.clone()));
        Ok(())
    }

    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Lesson>> {
        Ok(self
            .tables
            .lock()
            .lessons
            .iter()
            .find(|r| !r.deleted && r.value.id == id)
            .map(|r| r.value.clone()))
    }

    async fn find_by_course(&self, course_id: EntityId) -> RepoResult<Vec<Lesson>> {
        let tables = self.tables.lock();
        let mut lessons: Vec<Lesson> = tables.live_lessons(course_id).cloned().collect();
        lessons.sort_by_key(|l| l.order);
        Ok(lessons)
    }

    async fn update(&self, lesson: &Lesson) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        if order_taken(&tables, lesson) {
            return Err(DomainError::LessonOrderTaken(lesson.order));
        }
        let row = tables
            .lessons
            .iter_mut()
            .find(|r| !r.deleted && r.value.id == lesson.id)
            .ok_or(DomainError::LessonNotFound(lesson.id))?;
        row.value = Lesson {
            course_id: row.value.course_id,
            created_at: row.value.created_at,
            ..lesson.clone()
        };
        Ok(())
    }

    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        let row = tables
            .lessons
            .iter_mut()
            .find(|r| !r.deleted && r.value.id == id)
            .ok_or(DomainError::LessonNotFound(id))?;
        row.deleted = true;
        Ok(())
    }
}
