use dictionary::{Dictionary, DictionaryError, PartOfSpeech, Url};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const RUN_BODY: &str = r#"[{
    "word": "run",
    "phonetic": "/ɹʌn/",
    "phonetics": [{"text": "/ɹʌn/", "audio": ""}],
    "meanings": [{
        "partOfSpeech": "verb",
        "definitions": [
            {"definition": "move fast", "example": "He can run fast.", "synonyms": [], "antonyms": []},
            {"definition": "operate", "example": null, "synonyms": [], "antonyms": []}
        ],
        "synonyms": ["sprint"]
    }]
}]"#;

/// Serves a single canned response and yields the request line it received.
async fn serve_once(status: &'static str, body: &'static str) -> (Url, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buffer = [0u8; 1024];
        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            let read = socket.read(&mut buffer).await.unwrap();
            if read == 0 {
                break;
            }
            request.extend_from_slice(&buffer[..read]);
        }
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        let request = String::from_utf8_lossy(&request).into_owned();
        request.lines().next().unwrap_or_default().to_owned()
    });
    let url = Url::parse(&format!("http://{address}/api/v2/entries/en")).unwrap();
    (url, handle)
}

#[tokio::test]
async fn lookup_projects_the_first_definition() {
    let (url, server) = serve_once("200 OK", RUN_BODY).await;
    let dictionary = Dictionary::with_base_url(url);

    let result = dictionary.lookup("  run ").await.unwrap();

    assert_eq!(result.word, "run");
    assert_eq!(result.meaning, "move fast");
    assert_eq!(result.part_of_speech, PartOfSpeech::Verb);
    assert_eq!(result.pronunciation, "/ɹʌn/");
    assert_eq!(result.synonyms, vec!["sprint".to_string()]);
    assert!(result.antonyms.is_empty());
    assert_eq!(result.examples, vec!["He can run fast.".to_string()]);

    let request_line = server.await.unwrap();
    assert_eq!(request_line, "GET /api/v2/entries/en/run HTTP/1.1");
}

#[tokio::test]
async fn non_success_status_is_not_found() {
    let body = r#"{"title": "No Definitions Found"}"#;
    let (url, server) = serve_once("404 Not Found", body).await;
    let dictionary = Dictionary::with_base_url(url);

    let error = dictionary.lookup("qwertyuiop").await.unwrap_err();

    match &error {
        DictionaryError::NotFound(not_found) => assert_eq!(not_found.word(), "qwertyuiop"),
        other => panic!("expected not found, got {other:?}"),
    }
    assert_eq!(
        error.to_string(),
        "Word \"qwertyuiop\" not found in the dictionary."
    );
    server.await.unwrap();
}

#[tokio::test]
async fn server_errors_are_reported_as_not_found() {
    let (url, server) = serve_once("500 Internal Server Error", "oops").await;
    let dictionary = Dictionary::with_base_url(url);

    let error = dictionary.lookup("run").await.unwrap_err();

    assert!(matches!(error, DictionaryError::NotFound(_)));
    server.await.unwrap();
}

#[tokio::test]
async fn empty_entry_list_has_no_definition() {
    let (url, server) = serve_once("200 OK", "[]").await;
    let dictionary = Dictionary::with_base_url(url);

    let error = dictionary.lookup("void").await.unwrap_err();

    assert!(matches!(error, DictionaryError::NoDefinition(_)));
    assert_eq!(error.to_string(), "No valid definitions found for \"void\".");
    server.await.unwrap();
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let (url, server) = serve_once("200 OK", "{not json").await;
    let dictionary = Dictionary::with_base_url(url);

    let error = dictionary.lookup("run").await.unwrap_err();

    assert!(matches!(error, DictionaryError::Deserialize(_)));
    server.await.unwrap();
}

#[tokio::test]
async fn blank_word_is_rejected_without_a_request() {
    // Nothing listens on this address; a request would surface as a fetch error.
    let url = Url::parse("http://127.0.0.1:9/api/v2/entries/en").unwrap();
    let dictionary = Dictionary::with_base_url(url);

    let error = dictionary.lookup("   ").await.unwrap_err();

    assert!(matches!(error, DictionaryError::EmptyQuery));
}
