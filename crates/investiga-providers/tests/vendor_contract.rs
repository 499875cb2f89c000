//! Vendor contract tests.
//!
//! Each provider is pointed at a mock server to check the request it sends
//! and how it maps the answer, including vendor failures.

use investiga_core::{Provider, ProvidersConfig, SubjectField, ATTR_NOT_FOUND};
use investiga_providers::{
    build_http_client, CepProvider, CnpjProvider, DatajudProvider, DirectDataProvider,
    DuckDuckGoProvider, GithubProvider, HibpProvider, LookupOptions, LookupProvider,
    ProviderRegistry, WikipediaProvider,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> reqwest::Client {
    build_http_client(Some(5), "investiga-test").expect("http client")
}

#[tokio::test]
async fn test_viacep_address_and_flagged_miss() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ws/01001000/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cep": "01001-000",
            "logradouro": "Praça da Sé",
            "bairro": "Sé",
            "localidade": "São Paulo",
            "uf": "SP"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ws/99999999/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"erro": "true"})))
        .expect(1)
        .mount(&server)
        .await;

    let provider = CepProvider::with_base_url(client(), server.uri());

    let items = provider
        .lookup("01001-000", &LookupOptions::default())
        .await
        .expect("lookup");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title.as_deref(), Some("Endereço encontrado"));
    assert_eq!(
        items[0].description.as_deref(),
        Some("Praça da Sé, Sé, São Paulo-SP")
    );

    let items = provider
        .lookup("99999-999", &LookupOptions::default())
        .await
        .expect("lookup");
    assert!(items[0].is_not_found());
    assert_eq!(items[0].title.as_deref(), Some("CEP não encontrado"));
}

#[tokio::test]
async fn test_viacep_malformed_cep_skips_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let provider = CepProvider::with_base_url(client(), server.uri());
    let items = provider
        .lookup("123", &LookupOptions::default())
        .await
        .expect("lookup");
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_cnpja_found_and_missing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/office/11222333000181"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "alias": "Padaria Central",
            "company": {"name": "PADARIA CENTRAL LTDA"},
            "status": {"text": "Ativa"}
        })))
        .mount(&server)
        .await;

    let provider = CnpjProvider::with_base_url(client(), server.uri());
    let items = provider
        .lookup("11.222.333/0001-81", &LookupOptions::default())
        .await
        .expect("lookup");
    assert_eq!(items[0].title.as_deref(), Some("PADARIA CENTRAL LTDA"));
    assert_eq!(items[0].attr_str("cnpj"), Some("11.222.333/0001-81"));

    // Bad check digits never reach the vendor
    let items = provider
        .lookup("11222333000180", &LookupOptions::default())
        .await
        .expect("lookup");
    assert_eq!(items[0].title.as_deref(), Some("CNPJ inválido"));
}

#[tokio::test]
async fn test_cnpja_404_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let provider = CnpjProvider::with_base_url(client(), server.uri());
    let items = provider
        .lookup("11222333000181", &LookupOptions::default())
        .await
        .expect("lookup");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].attr(ATTR_NOT_FOUND), Some(&json!(true)));
}

#[tokio::test]
async fn test_hibp_sends_key_and_maps_breaches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/breachedaccount/ana%40exemplo.com.br"))
        .and(header("hibp-api-key", "secret"))
        .and(query_param("truncateResponse", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"Name": "Adobe", "Title": "Adobe", "Domain": "adobe.com", "BreachDate": "2013-10-04"},
            {"Name": "Canva", "Title": "Canva", "Domain": "canva.com", "BreachDate": "2019-05-24"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let provider = HibpProvider::with_base_url(client(), server.uri(), Some("secret".into()));
    let items = provider
        .lookup(" Ana@Exemplo.com.br ", &LookupOptions::default())
        .await
        .expect("lookup");
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].title.as_deref(), Some("Canva"));
    assert_eq!(items[1].url.as_deref(), Some("https://canva.com"));
}

#[tokio::test]
async fn test_directdata_endpoint_and_auth_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/phone"))
        .and(query_param("q", "11987654321"))
        .and(query_param("limit", "5"))
        .and(header("Authorization", "Bearer k-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"name": "HEITOR NOGUEIRA PRADO", "cpf": "52998224725"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = ProvidersConfig {
        direct_data_base_url: Some(format!("{}/", server.uri())),
        direct_data_auth_header: "Authorization".to_string(),
        direct_data_api_key: Some("k-123".to_string()),
        direct_data_auth_scheme: Some("Bearer".to_string()),
        ..ProvidersConfig::default()
    };
    let provider = DirectDataProvider::new(client(), &config);
    let items = provider
        .lookup(
            "(11) 98765-4321",
            &LookupOptions::for_field(SubjectField::Celular),
        )
        .await
        .expect("lookup");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title.as_deref(), Some("HEITOR NOGUEIRA PRADO"));
    assert_eq!(items[0].raw.as_ref().and_then(|r| r.get("cpf")), Some(&json!("52998224725")));
}

#[tokio::test]
async fn test_datajud_posts_party_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api_publica_tjsp/_search"))
        .and(header("Authorization", "APIKey dj"))
        .and(body_partial_json(json!({
            "query": {"match_phrase": {"partes.nome": "Heitor Nogueira Prado"}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": {"hits": [{"_source": {
                "numeroProcesso": "00012345620208260100",
                "tribunal": "TJSP",
                "classe": {"nome": "Execução Fiscal"}
            }}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider =
        DatajudProvider::with_base_url(client(), server.uri(), "tjsp", Some("dj".to_string()));
    let items = provider
        .lookup("Heitor Nogueira Prado", &LookupOptions::default())
        .await
        .expect("lookup");
    assert_eq!(
        items[0].title.as_deref(),
        Some("Processo 00012345620208260100")
    );
}

#[tokio::test]
async fn test_web_providers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "RelatedTopics": [{"Text": "Heitor Prado", "FirstURL": "https://duckduckgo.com/Heitor_Prado"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("srsearch", "Heitor Prado"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": {"search": [{"title": "Heitor Prado", "snippet": "<b>Heitor</b> Prado"}]}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(header("Authorization", "Bearer gh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"full_name": "hprado/x", "html_url": "https://github.com/hprado/x", "stargazers_count": 3}]
        })))
        .mount(&server)
        .await;

    let options = LookupOptions::default();
    let ddg = DuckDuckGoProvider::with_base_url(client(), server.uri());
    assert_eq!(
        ddg.lookup("Heitor Prado", &options).await.expect("ddg")[0]
            .url
            .as_deref(),
        Some("https://duckduckgo.com/Heitor_Prado")
    );

    let wiki = WikipediaProvider::with_base_url(client(), "pt", server.uri());
    let items = wiki.lookup("Heitor Prado", &options).await.expect("wiki");
    assert_eq!(items[0].description.as_deref(), Some("Heitor Prado"));
    assert_eq!(
        items[0].url.as_deref(),
        Some("https://pt.wikipedia.org/wiki/Heitor_Prado")
    );

    let github = GithubProvider::with_base_url(client(), server.uri(), Some("gh".to_string()));
    let items = github.lookup("hprado", &options).await.expect("github");
    assert_eq!(items[0].attr("stars"), Some(&json!(3)));
}

#[tokio::test]
async fn test_registry_isolates_vendor_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let registry = ProviderRegistry::new()
        .with(GithubProvider::with_base_url(client(), server.uri(), None))
        .with(DuckDuckGoProvider::with_base_url(client(), server.uri()))
        .with(HibpProvider::with_base_url(client(), server.uri(), None));
    let options = LookupOptions::default();

    let github = registry.fetch(Provider::Github, "acme", &options).await;
    assert_eq!(github.len(), 1);
    assert_eq!(github[0].error_message(), Some("GitHub HTTP 503"));

    let ddg = registry.fetch(Provider::DuckDuckGo, "acme", &options).await;
    assert!(ddg[0]
        .error_message()
        .expect("error sentinel")
        .starts_with("DuckDuckGo falhou"));

    let hibp = registry
        .fetch(Provider::EmailHibp, "ana@exemplo.com", &options)
        .await;
    assert_eq!(
        hibp[0].error_message(),
        Some("HIBP não configurado")
    );
}
