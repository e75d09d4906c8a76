//! Users, categories, courses and lessons

use academy_core::entities::{Category, Course, CourseLevel, ForumCategory, Lesson, User, UserRole};
use academy_core::value_objects::EntityId;
use academy_core::DomainError;

use crate::models::{CategoryModel, CourseModel, ForumCategoryModel, LessonModel, UserModel};

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        let role = UserRole::parse(&model.role).ok_or_else(|| {
            DomainError::DatabaseError(format!("user {} has unknown role '{}'", model.id, model.role))
        })?;
        Ok(User {
            id: EntityId::from(model.id),
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            profile_image_url: model.profile_image_url,
            role,
            billing_customer_id: model.billing_customer_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<CategoryModel> for Category {
    fn from(model: CategoryModel) -> Self {
        Category {
            id: EntityId::from(model.id),
            name: model.name,
            description: model.description,
            created_at: model.created_at,
        }
    }
}

impl From<ForumCategoryModel> for ForumCategory {
    fn from(model: ForumCategoryModel) -> Self {
        ForumCategory {
            id: EntityId::from(model.id),
            name: model.name,
            description: model.description,
            icon: model.icon,
            created_at: model.created_at,
        }
    }
}

impl TryFrom<CourseModel> for Course {
    type Error = DomainError;

    fn try_from(model: CourseModel) -> Result<Self, Self::Error> {
        let level = CourseLevel::parse(&model.level).ok_or_else(|| {
            DomainError::DatabaseError(format!("course {} has unknown level '{}'", model.id, model.level))
        })?;
        Ok(Course {
            id: EntityId::from(model.id),
            title: model.title,
            description: model.description,
            thumbnail: model.thumbnail,
            price: model.price,
            currency: model.currency,
            category_id: model.category_id.map(EntityId::from),
            instructor_id: EntityId::from(model.instructor_id),
            level,
            duration: model.duration,
            is_published: model.is_published,
            rating: model.rating,
            total_enrollments: model.total_enrollments,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<LessonModel> for Lesson {
    fn from(model: LessonModel) -> Self {
        Lesson {
            id: EntityId::from(model.id),
            course_id: EntityId::from(model.course_id),
            title: model.title,
            description: model.description,
            content: model.content,
            video_url: model.video_url,
            duration: model.duration,
            order: model.order,
            is_preview: model.is_preview,
            created_at: model.created_at,
        }
    }
}
