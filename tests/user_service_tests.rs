use churchsite::{
    models::Role,
    repositories::user_repository::SqliteUserRepository,
    services::{
        password::verify_password,
        user_service::{CreateUserRequest, UpdatePasswordRequest, UserService, UserServiceError},
    },
    test_utils::test_helpers,
};
use std::sync::Arc;

async fn service() -> UserService {
    let pool = test_helpers::create_test_db().await.unwrap();
    UserService::new(Arc::new(SqliteUserRepository::new(pool)))
}

fn request(username: &str, password: &str) -> CreateUserRequest {
    CreateUserRequest {
        username: username.to_string(),
        password: password.to_string(),
        password_confirm: Some(password.to_string()),
        email: None,
        role: Role::User,
    }
}

#[tokio::test]
async fn test_create_user_success() {
    let user_service = service().await;

    let mut create = request("  worship_leader ", "hallelujah");
    create.email = Some("worship@church.com".to_string());
    create.role = Role::Admin;

    let user = user_service.create_user(create).await.unwrap();

    assert_eq!(user.username, "worship_leader");
    assert_eq!(user.email.as_deref(), Some("worship@church.com"));
    assert_eq!(user.role(), Role::Admin);
    assert_ne!(user.password_hash, "hallelujah");
    assert!(verify_password("hallelujah", &user.password_hash).is_valid());
}

#[tokio::test]
async fn test_create_user_duplicate_username() {
    let user_service = service().await;

    user_service
        .create_user(request("choir", "password1"))
        .await
        .unwrap();
    let result = user_service.create_user(request("choir", "password2")).await;

    assert!(matches!(result, Err(UserServiceError::UsernameTaken)));
}

#[tokio::test]
async fn test_create_user_enforces_account_rules() {
    let user_service = service().await;

    assert!(matches!(
        user_service.create_user(request("ab", "password1")).await,
        Err(UserServiceError::InvalidUsername)
    ));
    assert!(matches!(
        user_service.create_user(request("abc", "12345")).await,
        Err(UserServiceError::WeakPassword)
    ));

    let mut mismatched = request("abc", "password1");
    mismatched.password_confirm = Some("password2".to_string());
    assert!(matches!(
        user_service.create_user(mismatched).await,
        Err(UserServiceError::PasswordMismatch)
    ));

    // Exactly at the limits is fine
    assert!(user_service.create_user(request("abc", "123456")).await.is_ok());
}

#[tokio::test]
async fn test_update_password() {
    let user_service = service().await;
    let user = user_service
        .create_user(request("elder", "oldpassword"))
        .await
        .unwrap();

    user_service
        .update_password(UpdatePasswordRequest {
            user_id: user.id,
            new_password: "newpassword".to_string(),
            new_password_confirm: Some("newpassword".to_string()),
        })
        .await
        .unwrap();

    let updated = user_service
        .find_user_by_username("elder")
        .await
        .unwrap()
        .unwrap();
    assert!(verify_password("newpassword", &updated.password_hash).is_valid());
    assert!(!verify_password("oldpassword", &updated.password_hash).is_valid());

    let missing = user_service
        .update_password(UpdatePasswordRequest {
            user_id: 9999,
            new_password: "newpassword".to_string(),
            new_password_confirm: None,
        })
        .await;
    assert!(matches!(missing, Err(UserServiceError::UserNotFound)));
}

#[tokio::test]
async fn test_list_users() {
    let user_service = service().await;
    for name in ["alpha", "bravo", "charlie"] {
        user_service
            .create_user(request(name, "password1"))
            .await
            .unwrap();
    }

    let all = user_service.list_users(None, None).await.unwrap();
    assert_eq!(all.len(), 3);

    let page = user_service.list_users(Some(2), Some(1)).await.unwrap();
    assert_eq!(page.len(), 2);
}

#[tokio::test]
async fn test_delete_user() {
    let user_service = service().await;
    let user = user_service
        .create_user(request("visitor", "password1"))
        .await
        .unwrap();

    user_service.delete_user(user.id).await.unwrap();

    assert!(user_service
        .find_user_by_username("visitor")
        .await
        .unwrap()
        .is_none());
    assert!(matches!(
        user_service.delete_user(user.id).await,
        Err(UserServiceError::UserNotFound)
    ));
}
