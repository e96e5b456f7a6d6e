//! User entity <-> model mapper

use padel_core::entities::User;
use padel_core::value_objects::UserId;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.id),
            email: model.email,
            display_name: model.display_name,
            image: model.image,
            level: model.level,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
