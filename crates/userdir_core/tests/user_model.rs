use userdir_core::{AccessLevel, Admin, RecordValidationError, User, UserId};

#[test]
fn user_new_derives_user_access_level() {
    let user = User::new("2", "Maria").unwrap();

    assert_eq!(user.id().as_str(), "2");
    assert_eq!(user.name(), "Maria");
    assert_eq!(user.access_level(), AccessLevel::User);
    assert!(!user.is_admin());
}

#[test]
fn admin_new_derives_admin_access_level() {
    let admin = Admin::new("1", "SuperAdmin").unwrap();

    assert_eq!(admin.name(), "SuperAdmin");
    assert_eq!(admin.as_user().access_level(), AccessLevel::Admin);
    assert!(admin.as_user().is_admin());
}

#[test]
fn blank_id_or_name_is_rejected() {
    assert_eq!(
        User::new("", "Maria").unwrap_err(),
        RecordValidationError::EmptyId
    );
    assert_eq!(
        User::new("  ", "Maria").unwrap_err(),
        RecordValidationError::EmptyId
    );
    assert_eq!(
        User::new("2", " \t").unwrap_err(),
        RecordValidationError::EmptyName
    );
    assert_eq!(
        Admin::new("", "Root").unwrap_err(),
        RecordValidationError::EmptyId
    );
}

#[test]
fn id_and_name_are_trimmed() {
    let user = User::new(" 42 ", "  Ivan ").unwrap();

    assert_eq!(user.id(), &UserId::parse("42").unwrap());
    assert_eq!(user.name(), "Ivan");
}

#[test]
fn rename_replaces_name_and_keeps_old_one_on_rejection() {
    let mut user = User::new("2", "Maria").unwrap();

    user.rename("Mariya").unwrap();
    assert_eq!(user.name(), "Mariya");

    let err = user.rename("   ").unwrap_err();
    assert_eq!(err, RecordValidationError::EmptyName);
    assert_eq!(user.name(), "Mariya");
    assert_eq!(user.access_level(), AccessLevel::User);
}

#[test]
fn user_serialization_uses_expected_wire_fields() {
    let user = User::new("2", "Maria").unwrap();

    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["id"], "2");
    assert_eq!(json["name"], "Maria");
    assert_eq!(json["access_level"], "user");

    let decoded: User = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, user);
}

#[test]
fn deserialize_rejects_blank_name() {
    let value = serde_json::json!({
        "id": "2",
        "name": "  ",
        "access_level": "user",
    });

    let err = serde_json::from_value::<User>(value).unwrap_err();
    assert!(err.to_string().contains("name must not be blank"));
}
