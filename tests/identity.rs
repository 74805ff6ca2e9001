mod common;

use gatherly::AppError;
use gatherly::auth::{self, Role, Session, password};
use uuid::Uuid;

#[tokio::test]
async fn register_stores_a_hash_not_the_password() {
    let app = common::app().await;
    let user = app
        .identity
        .register("a@x.com", "secret1", Role::User)
        .await
        .unwrap();

    assert_ne!(user.password_hash, "secret1");
    assert!(password::verify("secret1", &user.password_hash));
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let app = common::app().await;
    app.identity
        .register("a@x.com", "secret1", Role::User)
        .await
        .unwrap();

    let err = app
        .identity
        .register("a@x.com", "other", Role::Admin)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateEmail));
}

#[tokio::test]
async fn authenticate_checks_credentials() {
    let app = common::app().await;
    app.identity
        .register("a@x.com", "secret1", Role::User)
        .await
        .unwrap();

    let session = app
        .identity
        .authenticate("a@x.com", "secret1", Role::User)
        .await
        .unwrap();
    assert_eq!(session.user.email, "a@x.com");

    assert!(matches!(
        app.identity.authenticate("a@x.com", "wrong", Role::User).await,
        Err(AppError::InvalidCredentials)
    ));
    assert!(matches!(
        app.identity
            .authenticate("nobody@x.com", "secret1", Role::User)
            .await,
        Err(AppError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn wrong_portal_is_a_role_mismatch() {
    let app = common::app().await;
    app.identity
        .register("b@x.com", "secret2", Role::Admin)
        .await
        .unwrap();

    // a real admin still has to come in through the admin portal
    assert!(matches!(
        app.identity
            .authenticate("b@x.com", "secret2", Role::User)
            .await,
        Err(AppError::RoleMismatch)
    ));
    app.identity
        .authenticate("b@x.com", "secret2", Role::Admin)
        .await
        .unwrap();
}

#[tokio::test]
async fn require_role_gates_by_exact_role() {
    let app = common::app().await;
    let user = common::user(&app, "a@x.com").await;
    let session = Session { user };

    assert!(matches!(
        auth::require_role(&session, Role::Admin),
        Err(AppError::Forbidden)
    ));

    let authorization = auth::require_role(&session, Role::User).unwrap();
    assert_eq!(authorization.user_id, session.user.id);
    assert_eq!(authorization.role, Role::User);
}

#[tokio::test]
async fn find_user_round_trips() {
    let app = common::app().await;
    let user = common::user(&app, "a@x.com").await;

    let loaded = app.identity.find_user(user.id).await.unwrap().unwrap();
    assert_eq!(loaded, user);

    assert!(
        app.identity
            .find_user(Uuid::now_v7())
            .await
            .unwrap()
            .is_none()
    );
}
