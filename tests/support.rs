mod common;

use common::{SERVER_ERROR, USER_ADMIN, test_client};
use mockito::{Matcher, Server};
use rs_edgegrid_iam::{ListStatesRequest, Operation, Support, TimeoutPolicy, Timezone};

#[tokio::test]
async fn supported_countries() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", format!("{USER_ADMIN}/common/countries").as_str())
        .with_status(200)
        .with_body(r#"["Afghanistan", "Aland Islands", "Albania"]"#)
        .create_async()
        .await;

    let client = test_client(server.url());
    let countries = client.supported_countries().await.unwrap();

    assert_eq!(countries, vec!["Afghanistan", "Aland Islands", "Albania"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn supported_contact_types_and_languages() {
    let mut server = Server::new_async().await;

    let contact_types = server
        .mock("GET", format!("{USER_ADMIN}/common/contact-types").as_str())
        .with_status(200)
        .with_body(r#"["Billing", "Security"]"#)
        .create_async()
        .await;
    let languages = server
        .mock("GET", format!("{USER_ADMIN}/common/supported-languages").as_str())
        .with_status(200)
        .with_body(r#"["Deutsch", "English"]"#)
        .create_async()
        .await;

    let client = test_client(server.url());
    assert_eq!(
        client.supported_contact_types().await.unwrap(),
        vec!["Billing", "Security"]
    );
    assert_eq!(
        client.supported_languages().await.unwrap(),
        vec!["Deutsch", "English"]
    );

    contact_types.assert_async().await;
    languages.assert_async().await;
}

#[tokio::test]
async fn supported_timezones() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", format!("{USER_ADMIN}/common/timezones").as_str())
        .with_status(200)
        .with_body(
            r#"[{"timezone": "Asia/Rangoon", "description": "Asia/Rangoon GMT+6", "offset": "+6", "posix": "Asia/Rangoon"}]"#,
        )
        .create_async()
        .await;

    let client = test_client(server.url());
    let timezones = client.supported_timezones().await.unwrap();

    assert_eq!(
        timezones,
        vec![Timezone {
            timezone: "Asia/Rangoon".to_string(),
            description: "Asia/Rangoon GMT+6".to_string(),
            offset: "+6".to_string(),
            posix: "Asia/Rangoon".to_string(),
        }]
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn supported_timezones_server_error() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", format!("{USER_ADMIN}/common/timezones").as_str())
        .with_status(500)
        .with_body(SERVER_ERROR)
        .create_async()
        .await;

    let client = test_client(server.url());
    let err = client.supported_timezones().await.unwrap_err();

    assert_eq!(err.operation(), Some(Operation::SupportedTimezones));
    let api = err.api_error().unwrap();
    assert_eq!(api.error_type, "internal_error");
    assert_eq!(api.detail, "Error making request");
}

#[tokio::test]
async fn list_products_and_timeout_policies() {
    let mut server = Server::new_async().await;

    let products = server
        .mock("GET", format!("{USER_ADMIN}/common/notification-products").as_str())
        .with_status(200)
        .with_body(r#"["EdgeScape", "EdgeWorkers"]"#)
        .create_async()
        .await;
    let policies = server
        .mock("GET", format!("{USER_ADMIN}/common/timeout-policies").as_str())
        .with_status(200)
        .with_body(r#"[{"name": "after15Minutes", "value": 900}, {"name": "after30Minutes", "value": 1800}]"#)
        .create_async()
        .await;

    let client = test_client(server.url());
    assert_eq!(client.list_products().await.unwrap().len(), 2);
    assert_eq!(
        client.list_timeout_policies().await.unwrap()[0],
        TimeoutPolicy {
            name: "after15Minutes".to_string(),
            value: 900,
        }
    );

    products.assert_async().await;
    policies.assert_async().await;
}

#[tokio::test]
async fn list_states() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", format!("{USER_ADMIN}/common/countries/canada/states").as_str())
        .with_status(200)
        .with_body(r#"["AB", "BC", "MB"]"#)
        .create_async()
        .await;

    let client = test_client(server.url());
    let states = client
        .list_states(ListStatesRequest {
            country: "canada".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(states, vec!["AB", "BC", "MB"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn list_states_requires_country() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = test_client(server.url());
    let err = client
        .list_states(ListStatesRequest::default())
        .await
        .unwrap_err();

    assert!(
        err.validation_errors()
            .unwrap()
            .field_errors()
            .contains_key("country")
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn get_password_policy() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", format!("{USER_ADMIN}/common/password-policy").as_str())
        .with_status(200)
        .with_body(
            r#"{
                "caseDif": 0,
                "maxRepeating": 1,
                "minDigits": 1,
                "minLength": 1,
                "minLetters": 1,
                "minNonAlpha": 0,
                "minReuse": 1,
                "pwclass": "test_class",
                "rotateFrequency": 10
            }"#,
        )
        .create_async()
        .await;

    let client = test_client(server.url());
    let policy = client.get_password_policy().await.unwrap();

    assert_eq!(policy.pw_class, "test_class");
    assert_eq!(policy.min_reuse, 1);
    assert_eq!(policy.rotate_frequency, 10);
    mock.assert_async().await;
}

#[tokio::test]
async fn malformed_success_body_is_deserialize_error() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", format!("{USER_ADMIN}/common/password-policy").as_str())
        .with_status(200)
        .with_body("[1, 2, 3]")
        .create_async()
        .await;

    let client = test_client(server.url());
    let err = client.get_password_policy().await.unwrap_err();

    assert!(matches!(
        err,
        rs_edgegrid_iam::IamError::Deserialize {
            operation: Operation::GetPasswordPolicy,
            ..
        }
    ));
}
