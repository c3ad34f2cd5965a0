mod common;

use common::{SERVER_ERROR, USER_ADMIN, signed, test_client};
use mockito::{Matcher, Server};
use rs_edgegrid_iam::{
    AuthGrantRequest, CreateUserRequest, GetUserRequest, IamError, ListUsersRequest, Operation,
    RemoveUserRequest, TfaAction, UpdateTfaRequest, UpdateUserAuthGrantsRequest,
    UpdateUserInfoRequest, UpdateUserNotificationsRequest, UserBasicInfo, UserNotificationOptions,
    UserNotifications, Users,
};

fn john_doe() -> UserBasicInfo {
    UserBasicInfo {
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        email: "john.doe@mycompany.com".to_string(),
        phone: "(123) 321-1234".to_string(),
        country: "USA".to_string(),
        state: "CA".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn create_user_created() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", format!("{USER_ADMIN}/ui-identities").as_str())
        .match_query(Matcher::Exact("sendEmail=true".to_string()))
        .match_header("Authorization", signed())
        .match_body(Matcher::PartialJsonString(
            r#"{"firstName":"John","country":"USA","authGrants":[{"groupId":1,"isBlocked":false,"roleId":1}]}"#
                .to_string(),
        ))
        .with_status(201)
        .with_body(
            r#"{
                "uiIdentityId": "A-BC-1234567",
                "firstName": "John",
                "lastName": "Doe",
                "email": "john.doe@mycompany.com",
                "phone": "(123) 321-1234",
                "state": "CA",
                "country": "USA"
            }"#,
        )
        .create_async()
        .await;

    let client = test_client(server.url());
    let user = client
        .create_user(CreateUserRequest {
            user: john_doe(),
            auth_grants: vec![AuthGrantRequest {
                group_id: 1,
                role_id: Some(1),
                ..Default::default()
            }],
            send_email: true,
            ..Default::default()
        })
        .await
        .expect("create_user should succeed");

    assert_eq!(user.identity_id, "A-BC-1234567");
    assert_eq!(user.basic_info, john_doe());
    assert!(user.auth_grants.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn create_user_invalid_email_sends_nothing() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = test_client(server.url());
    let mut user = john_doe();
    user.email = "john.doe".to_string();
    let err = client
        .create_user(CreateUserRequest {
            user,
            auth_grants: vec![AuthGrantRequest {
                group_id: 1,
                role_id: Some(1),
                ..Default::default()
            }],
            ..Default::default()
        })
        .await
        .unwrap_err();

    let fields = err.validation_errors().unwrap().field_errors();
    assert_eq!(fields.len(), 1);
    assert!(fields.contains_key("email"));
    mock.assert_async().await;
}

#[tokio::test]
async fn get_user_with_grants_and_notifications() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", format!("{USER_ADMIN}/ui-identities/A-BC-1234567").as_str())
        .match_query(Matcher::Exact(
            "actions=false&authGrants=true&notifications=true".to_string(),
        ))
        .with_status(200)
        .with_body(
            r#"{
                "uiIdentityId": "A-BC-1234567",
                "firstName": "John",
                "lastName": "Doe",
                "email": "john.doe@mycompany.com",
                "country": "USA",
                "isLocked": true,
                "tfaConfigured": true,
                "authGrants": [
                    {
                        "groupId": 1,
                        "groupName": "root",
                        "roleId": 3,
                        "roleName": "Admin",
                        "roleDescription": "Admin role",
                        "subGroups": [{"groupId": 2, "groupName": "child", "isBlocked": true}]
                    }
                ],
                "notifications": {
                    "enableEmailNotifications": true,
                    "options": {
                        "newUserNotification": true,
                        "passwordExpiry": true,
                        "proactive": ["NetStorage"],
                        "upgrade": []
                    }
                }
            }"#,
        )
        .create_async()
        .await;

    let client = test_client(server.url());
    let user = client
        .get_user(GetUserRequest {
            identity_id: "A-BC-1234567".to_string(),
            auth_grants: true,
            notifications: true,
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(user.is_locked);
    assert!(user.tfa_configured);
    assert_eq!(user.auth_grants[0].role_id, Some(3));
    assert!(user.auth_grants[0].sub_groups[0].is_blocked);
    assert_eq!(
        user.notifications.unwrap().options.proactive,
        vec!["NetStorage".to_string()]
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn get_user_not_found() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", format!("{USER_ADMIN}/ui-identities/X1-ABCDE").as_str())
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(
            r#"{"instance": "", "httpStatus": 404, "detail": "", "title": "User not found", "type": "/useradmin-api/error-types/1100"}"#,
        )
        .create_async()
        .await;

    let client = test_client(server.url());
    let err = client
        .get_user(GetUserRequest {
            identity_id: "X1-ABCDE".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert_eq!(err.operation(), Some(Operation::GetUser));
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.api_error().unwrap().title, "User not found");
}

#[tokio::test]
async fn list_users_without_group() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", format!("{USER_ADMIN}/ui-identities").as_str())
        .match_query(Matcher::Exact("actions=true&authGrants=false".to_string()))
        .with_status(200)
        .with_body(
            r#"[
                {
                    "uiIdentityId": "A-BC-1234567",
                    "firstName": "John",
                    "lastName": "Doe",
                    "uiUserName": "johndoe",
                    "email": "john.doe@mycompany.com",
                    "accountId": "1-123A",
                    "tfaEnabled": true,
                    "actions": {"delete": true, "edit": true, "canEditTFA": true}
                }
            ]"#,
        )
        .create_async()
        .await;

    let client = test_client(server.url());
    let users = client
        .list_users(ListUsersRequest {
            actions: true,
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].user_name, "johndoe");
    assert_eq!(users[0].account_id, "1-123A");
    let actions = users[0].actions.unwrap();
    assert!(actions.can_edit_tfa);
    assert!(!actions.api_client);
    mock.assert_async().await;
}

#[tokio::test]
async fn list_users_with_group() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", format!("{USER_ADMIN}/ui-identities").as_str())
        .match_query(Matcher::Exact(
            "actions=false&authGrants=true&groupId=12345".to_string(),
        ))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = test_client(server.url());
    let users = client
        .list_users(ListUsersRequest {
            group_id: Some(12345),
            auth_grants: true,
            actions: false,
        })
        .await
        .unwrap();

    assert!(users.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn remove_user_accepts_ok_and_no_content() {
    let mut server = Server::new_async().await;

    let ok = server
        .mock("DELETE", format!("{USER_ADMIN}/ui-identities/1-ABCDE").as_str())
        .with_status(200)
        .create_async()
        .await;
    let no_content = server
        .mock("DELETE", format!("{USER_ADMIN}/ui-identities/2-ABCDE").as_str())
        .with_status(204)
        .create_async()
        .await;

    let client = test_client(server.url());
    for id in ["1-ABCDE", "2-ABCDE"] {
        client
            .remove_user(RemoveUserRequest {
                identity_id: id.to_string(),
            })
            .await
            .expect("remove_user should succeed");
    }

    ok.assert_async().await;
    no_content.assert_async().await;
}

#[tokio::test]
async fn update_user_info_returns_stored_info() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("PUT", format!("{USER_ADMIN}/ui-identities/1-ABCDE/basic-info").as_str())
        .match_body(Matcher::PartialJsonString(
            r#"{"firstName":"John","timeZone":"GMT","preferredLanguage":"English","sessionTimeOut":900}"#
                .to_string(),
        ))
        .with_status(200)
        .with_body(
            r#"{"firstName": "John", "lastName": "Doe", "country": "USA", "timeZone": "GMT", "preferredLanguage": "English", "sessionTimeOut": 900}"#,
        )
        .create_async()
        .await;

    let client = test_client(server.url());
    let info = client
        .update_user_info(UpdateUserInfoRequest {
            identity_id: "1-ABCDE".to_string(),
            user: UserBasicInfo {
                time_zone: "GMT".to_string(),
                preferred_language: "English".to_string(),
                session_timeout: Some(900),
                ..john_doe()
            },
        })
        .await
        .unwrap();

    assert_eq!(info.session_timeout, Some(900));
    assert_eq!(info.time_zone, "GMT");
    mock.assert_async().await;
}

#[tokio::test]
async fn update_user_info_missing_fields() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("PUT", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = test_client(server.url());
    let err = client
        .update_user_info(UpdateUserInfoRequest {
            identity_id: "1-ABCDE".to_string(),
            user: john_doe(),
        })
        .await
        .unwrap_err();

    let fields = err.validation_errors().unwrap().field_errors();
    assert!(fields.contains_key("time_zone"));
    assert!(fields.contains_key("preferred_language"));
    assert!(fields.contains_key("session_timeout"));
    assert!(!fields.contains_key("first_name"));
    mock.assert_async().await;
}

#[tokio::test]
async fn update_user_notifications() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("PUT", format!("{USER_ADMIN}/ui-identities/1-ABCDE/notifications").as_str())
        .match_body(Matcher::Json(serde_json::json!({
            "enableEmailNotifications": true,
            "options": {
                "newUserNotification": false,
                "passwordExpiry": true,
                "proactive": ["EdgeScape"]
            }
        })))
        .with_status(200)
        .with_body(
            r#"{"enableEmailNotifications": true, "options": {"passwordExpiry": true, "proactive": ["EdgeScape"]}}"#,
        )
        .create_async()
        .await;

    let notifications = UserNotifications {
        enable_email: true,
        options: UserNotificationOptions {
            password_expiry: true,
            proactive: vec!["EdgeScape".to_string()],
            ..Default::default()
        },
    };

    let client = test_client(server.url());
    let stored = client
        .update_user_notifications(UpdateUserNotificationsRequest {
            identity_id: "1-ABCDE".to_string(),
            notifications: notifications.clone(),
        })
        .await
        .unwrap();

    assert_eq!(stored, notifications);
    mock.assert_async().await;
}

#[tokio::test]
async fn update_user_auth_grants() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("PUT", format!("{USER_ADMIN}/ui-identities/1-ABCDE/auth-grants").as_str())
        .match_body(Matcher::Exact(
            r#"[{"groupId":1,"isBlocked":false,"roleId":2}]"#.to_string(),
        ))
        .with_status(200)
        .with_body(r#"[{"groupId": 1, "groupName": "root", "roleId": 2, "roleName": "Admin"}]"#)
        .create_async()
        .await;

    let client = test_client(server.url());
    let grants = client
        .update_user_auth_grants(UpdateUserAuthGrantsRequest {
            identity_id: "1-ABCDE".to_string(),
            auth_grants: vec![AuthGrantRequest {
                group_id: 1,
                role_id: Some(2),
                ..Default::default()
            }],
        })
        .await
        .unwrap();

    assert_eq!(grants.len(), 1);
    assert_eq!(grants[0].group_name, "root");
    mock.assert_async().await;
}

#[tokio::test]
async fn update_tfa_no_content() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("PUT", format!("{USER_ADMIN}/ui-identities/1-ABCDE/tfa").as_str())
        .match_query(Matcher::Exact("action=enable".to_string()))
        .with_status(204)
        .create_async()
        .await;

    let client = test_client(server.url());
    client
        .update_tfa(UpdateTfaRequest {
            identity_id: "1-ABCDE".to_string(),
            action: TfaAction::Enable,
        })
        .await
        .expect("update_tfa should succeed");

    mock.assert_async().await;
}

#[tokio::test]
async fn update_tfa_missing_identity() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("PUT", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = test_client(server.url());
    let err = client
        .update_tfa(UpdateTfaRequest {
            identity_id: String::new(),
            action: TfaAction::Reset,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        IamError::Validation {
            operation: Operation::UpdateTfa,
            ..
        }
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn get_user_null_members_decode_as_empty() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", format!("{USER_ADMIN}/ui-identities/A-BC-1234567").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{
                "uiIdentityId": "A-BC-1234567",
                "firstName": "John",
                "lastName": "Doe",
                "email": "john.doe@mycompany.com",
                "country": "USA",
                "jobTitle": null,
                "isLocked": null,
                "lastLoginDate": null,
                "passwordExpiryDate": null,
                "authGrants": null,
                "notifications": null
            }"#,
        )
        .create_async()
        .await;

    let client = test_client(server.url());
    let user = client
        .get_user(GetUserRequest {
            identity_id: "A-BC-1234567".to_string(),
            ..Default::default()
        })
        .await
        .expect("null members should decode");

    assert_eq!(user.basic_info.first_name, "John");
    assert_eq!(user.basic_info.job_title, "");
    assert!(!user.is_locked);
    assert_eq!(user.last_login_date, "");
    assert_eq!(user.password_expiry_date, "");
    assert!(user.auth_grants.is_empty());
    assert!(user.notifications.is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn create_user_server_error() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("POST", format!("{USER_ADMIN}/ui-identities").as_str())
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body(SERVER_ERROR)
        .create_async()
        .await;

    let client = test_client(server.url());
    let err = client
        .create_user(CreateUserRequest {
            user: john_doe(),
            auth_grants: vec![AuthGrantRequest {
                group_id: 1,
                role_id: Some(1),
                ..Default::default()
            }],
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert_eq!(err.operation(), Some(Operation::CreateUser));
    let api = err.api_error().unwrap();
    assert_eq!(api.status_code, 500);
    assert_eq!(api.title, "Internal Server Error");
    assert_eq!(api.detail, "Error making request");
}

#[tokio::test]
async fn list_users_server_error() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", format!("{USER_ADMIN}/ui-identities").as_str())
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body(SERVER_ERROR)
        .create_async()
        .await;

    let client = test_client(server.url());
    let err = client
        .list_users(ListUsersRequest::default())
        .await
        .unwrap_err();

    assert_eq!(err.operation(), Some(Operation::ListUsers));
    let api = err.api_error().unwrap();
    assert_eq!(api.error_type, "internal_error");
    assert_eq!(api.status_code, 500);
}

#[tokio::test]
async fn remove_user_requires_identity() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("DELETE", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = test_client(server.url());
    let err = client
        .remove_user(RemoveUserRequest::default())
        .await
        .unwrap_err();

    assert!(
        err.validation_errors()
            .unwrap()
            .field_errors()
            .contains_key("identity_id")
    );
    assert_eq!(err.operation(), Some(Operation::RemoveUser));
    mock.assert_async().await;
}

#[tokio::test]
async fn remove_user_not_found() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("DELETE", format!("{USER_ADMIN}/ui-identities/X1-ABCDE").as_str())
        .with_status(404)
        .with_body(
            r#"{"instance": "", "httpStatus": 404, "detail": "User not found", "title": "User not found", "type": "/useradmin-api/error-types/1100"}"#,
        )
        .create_async()
        .await;

    let client = test_client(server.url());
    let err = client
        .remove_user(RemoveUserRequest {
            identity_id: "X1-ABCDE".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.operation(), Some(Operation::RemoveUser));
    let api = err.api_error().unwrap();
    assert_eq!(api.status_code, 404);
    assert_eq!(api.error_type, "/useradmin-api/error-types/1100");
}

#[tokio::test]
async fn update_user_info_server_error() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("PUT", format!("{USER_ADMIN}/ui-identities/1-ABCDE/basic-info").as_str())
        .with_status(500)
        .with_body(SERVER_ERROR)
        .create_async()
        .await;

    let client = test_client(server.url());
    let err = client
        .update_user_info(UpdateUserInfoRequest {
            identity_id: "1-ABCDE".to_string(),
            user: UserBasicInfo {
                time_zone: "GMT".to_string(),
                preferred_language: "English".to_string(),
                session_timeout: Some(900),
                ..john_doe()
            },
        })
        .await
        .unwrap_err();

    assert_eq!(err.operation(), Some(Operation::UpdateUserInfo));
    assert_eq!(err.api_error().unwrap().title, "Internal Server Error");
}

#[tokio::test]
async fn update_user_notifications_requires_identity() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("PUT", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = test_client(server.url());
    let err = client
        .update_user_notifications(UpdateUserNotificationsRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        IamError::Validation {
            operation: Operation::UpdateUserNotifications,
            ..
        }
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn update_user_notifications_server_error() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("PUT", format!("{USER_ADMIN}/ui-identities/1-ABCDE/notifications").as_str())
        .with_status(500)
        .with_body(SERVER_ERROR)
        .create_async()
        .await;

    let client = test_client(server.url());
    let err = client
        .update_user_notifications(UpdateUserNotificationsRequest {
            identity_id: "1-ABCDE".to_string(),
            notifications: UserNotifications::default(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.operation(), Some(Operation::UpdateUserNotifications));
    let api = err.api_error().unwrap();
    assert_eq!(api.status_code, 500);
    assert_eq!(api.detail, "Error making request");
}

#[tokio::test]
async fn update_user_auth_grants_server_error() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("PUT", format!("{USER_ADMIN}/ui-identities/1-ABCDE/auth-grants").as_str())
        .with_status(500)
        .with_body(SERVER_ERROR)
        .create_async()
        .await;

    let client = test_client(server.url());
    let err = client
        .update_user_auth_grants(UpdateUserAuthGrantsRequest {
            identity_id: "1-ABCDE".to_string(),
            auth_grants: vec![AuthGrantRequest {
                group_id: 1,
                role_id: Some(2),
                ..Default::default()
            }],
        })
        .await
        .unwrap_err();

    assert_eq!(err.operation(), Some(Operation::UpdateUserAuthGrants));
    assert_eq!(err.api_error().unwrap().error_type, "internal_error");
}
