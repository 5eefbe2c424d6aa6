use pretty_assertions::assert_eq;
use splunk_client::models::{ConfStanza, Props, Role, SavedSearch};
use splunk_client::{
    Client, ClientConfig, ClientError, EntryId, MemoryTransport, Method, Namespace,
};
use splunk_values::NamedParameterGroup;
use testresult::TestResult;

fn client(transport: &MemoryTransport) -> Client<MemoryTransport> {
    Client::with_transport(
        ClientConfig::new("https://localhost:8089").with_password("admin", "changeme"),
        transport.clone(),
    )
}

const SAVED_SEARCH: &str = r#"{
    "entry": [{
        "name": "errors",
        "acl": {"app": "search", "owner": "nobody"},
        "content": {
            "search": "index=main error",
            "disabled": false,
            "cron_schedule": "*/5 * * * *",
            "dispatch.earliest_time": "-5m",
            "action.email": "1",
            "action.email.to": "ops@x.com"
        }
    }]
}"#;

#[test_log::test(tokio::test)]
async fn it_reads_and_updates_a_saved_search() -> TestResult {
    let transport = MemoryTransport::new();
    transport.respond(200, r#"{"sessionKey": "k1"}"#).await;
    transport.respond(200, SAVED_SEARCH).await;
    transport.respond(200, "{}").await;

    let client = client(&transport);
    let id = EntryId::new(Namespace::new("nobody", "search"), "errors");

    let mut search: SavedSearch = client.read(&id).await?;
    assert_eq!(search.id, id);
    assert_eq!(search.content.actions.enabled_names(), vec!["email"]);

    search.content.disabled.set(true);
    search.content.actions.insert(
        NamedParameterGroup::new("email")
            .with_enabled(true)
            .with_parameter("to", "joe@x.com"),
    );
    client.update(&search).await?;

    let requests = transport.requests().await;
    assert_eq!(requests.len(), 3);

    assert_eq!(requests[1].method, Method::Get);
    assert_eq!(
        requests[1].display_path(),
        "servicesNS/nobody/search/saved/searches/errors"
    );

    let update = &requests[2];
    assert_eq!(update.method, Method::Post);
    assert!(
        update
            .headers
            .contains(&("Authorization".to_string(), "Splunk k1".to_string()))
    );
    assert_eq!(
        update.form.as_ref().map(|form| form.pairs().collect::<Vec<_>>()),
        Some(vec![
            ("search", "index=main error"),
            ("disabled", "true"),
            ("cron_schedule", "*/5 * * * *"),
            ("dispatch.earliest_time", "-5m"),
            ("actions", "email"),
            ("action.email", "1"),
            ("action.email.to", "joe@x.com"),
        ])
    );
    Ok(())
}

#[test_log::test(tokio::test)]
async fn it_lists_every_entry_of_a_collection() -> TestResult {
    let transport = MemoryTransport::new();
    transport.respond(200, r#"{"sessionKey": "k1"}"#).await;
    transport
        .respond(
            200,
            r#"{"entry": [
                {"name": "admin", "content": {"capabilities": ["admin_all_objects"], "srchJobsQuota": 50}},
                {"name": "user", "content": {"imported_roles": []}}
            ]}"#,
        )
        .await;

    let roles: Vec<Role> = client(&transport).list(&Namespace::global()).await?;

    let titles: Vec<&str> = roles.iter().map(|role| role.id.title.as_str()).collect();
    assert_eq!(titles, vec!["admin", "user"]);
    assert_eq!(roles[0].content.search_jobs_quota.value(), &50);
    assert!(roles[1].content.imported_roles.is_cleared());

    let list = &transport.requests().await[1];
    assert_eq!(list.display_path(), "services/authorization/roles");
    assert_eq!(list.query.get("count"), Some("0"));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn it_creates_and_deletes_a_stanza() -> TestResult {
    let transport = MemoryTransport::new();
    transport.respond(200, r#"{"sessionKey": "k1"}"#).await;
    transport.respond(201, "{}").await;
    transport.respond(200, "{}").await;

    let client = client(&transport);
    let id = EntryId::new(Namespace::new("nobody", "search"), "app_logs");
    let stanza = ConfStanza::<Props>::new(id.clone()).with_value("TRUNCATE", "0");

    client.create(&stanza).await?;
    client.delete::<ConfStanza<Props>>(&id).await?;

    let requests = transport.requests().await;
    assert_eq!(
        requests[1].display_path(),
        "servicesNS/nobody/search/configs/conf-props"
    );
    assert_eq!(
        requests[1].form.as_ref().map(|form| form.to_query_string()),
        Some("name=app_logs&TRUNCATE=0".to_string())
    );
    assert_eq!(requests[2].method, Method::Delete);
    assert_eq!(
        requests[2].display_path(),
        "servicesNS/nobody/search/configs/conf-props/app_logs"
    );
    Ok(())
}

#[test_log::test(tokio::test)]
async fn it_surfaces_server_messages() -> TestResult {
    let transport = MemoryTransport::new();
    transport.respond(200, r#"{"sessionKey": "k1"}"#).await;
    transport
        .respond(
            400,
            r#"{"messages": [{"type": "ERROR", "text": "Cannot create a role without a name"}]}"#,
        )
        .await;

    let result = client(&transport).create(&Role::default()).await;

    match result {
        Err(ClientError::Status { code, messages }) => {
            assert_eq!(code, 400);
            assert_eq!(messages, vec!["Cannot create a role without a name"]);
        }
        other => panic!("expected a status error, got {other:?}"),
    }
    Ok(())
}

#[test_log::test(tokio::test)]
async fn it_rejects_half_namespaces_before_sending() -> TestResult {
    let transport = MemoryTransport::new();
    transport.respond(200, r#"{"sessionKey": "k1"}"#).await;

    let result = client(&transport)
        .read::<Role>(&EntryId::new(Namespace::new("admin", ""), "x"))
        .await;

    assert!(matches!(result, Err(ClientError::InvalidNamespace { .. })));
    assert!(transport.requests().await.is_empty());
    Ok(())
}
