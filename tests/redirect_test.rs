mod common;

use common::{html, redirect, serve};
use smfedit::client::Client;
use smfedit::cookies::jar::CookieJar;
use smfedit::NetError;
use http::StatusCode;

#[tokio::test]
async fn test_redirect_limit() {
    let (base, log) = serve(|_req, base| {
        redirect("302 Found", &format!("{}/loop", base), &[])
    })
    .await;

    let result = Client::new()
        .get(format!("{}/start", base))
        .follow(3)
        .send()
        .await;
    assert_eq!(result.unwrap_err(), NetError::TooManyRedirects);
    // The first request plus three followed hops.
    assert_eq!(log.lock().unwrap().len(), 4);
}

#[tokio::test]
async fn test_no_follow_returns_redirect() {
    let (base, log) = serve(|_req, _base| redirect("302 Found", "/elsewhere", &[])).await;

    let resp = Client::new()
        .get(format!("{}/start", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.location(), Some("/elsewhere"));
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_client_default_redirect_limit() {
    let (base, _log) = serve(|req, _base| {
        if req.target == "/start" {
            redirect("301 Moved Permanently", "/target", &[])
        } else {
            html("TARGET")
        }
    })
    .await;

    let client = Client::builder().redirect_limit(2).build();
    let resp = client.get(format!("{}/start", base)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text(), "TARGET");
    assert!(resp.url().as_str().ends_with("/target"));
}

#[tokio::test]
async fn test_post_302_becomes_get() {
    let (base, log) = serve(|req, _base| {
        if req.method == "POST" {
            redirect("302 Found", "/done", &[])
        } else {
            html("done")
        }
    })
    .await;

    let resp = Client::new()
        .post(format!("{}/submit", base))
        .form([("message", "hello world")])
        .follow(5)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.text(), "done");

    let log = log.lock().unwrap();
    assert_eq!(log[0].method, "POST");
    assert_eq!(log[0].body, "message=hello+world");
    assert_eq!(
        log[0].header("content-type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(log[1].method, "GET");
    assert_eq!(log[1].target, "/done");
    assert!(log[1].body.is_empty());
}

#[tokio::test]
async fn test_post_307_keeps_method_and_body() {
    let (base, log) = serve(|req, _base| {
        if req.target == "/submit" {
            redirect("307 Temporary Redirect", "/again", &[])
        } else {
            html("ok")
        }
    })
    .await;

    Client::new()
        .post(format!("{}/submit", base))
        .form([("a", "1")])
        .follow(1)
        .send()
        .await
        .unwrap();

    let log = log.lock().unwrap();
    assert_eq!(log[1].method, "POST");
    assert_eq!(log[1].body, "a=1");
}

#[tokio::test]
async fn test_redirect_strips_cookies_cross_host() {
    let (other, other_log) = serve(|_req, _base| html("other")).await;
    // Same server, reached under a different host name.
    let other_host = other.replace("127.0.0.1", "localhost");

    let (base, log) = serve(move |_req, _base| redirect("302 Found", &other_host, &[])).await;

    let jar = CookieJar::new().with("PHPSESSID", "secret");
    Client::new()
        .get(format!("{}/start", base))
        .cookies(&jar)
        .follow(1)
        .send()
        .await
        .unwrap();

    assert_eq!(
        log.lock().unwrap()[0].header("cookie"),
        Some("PHPSESSID=secret")
    );
    assert_eq!(other_log.lock().unwrap()[0].header("cookie"), None);
}

#[tokio::test]
async fn test_invalid_redirect_scheme() {
    let (base, _log) = serve(|_req, _base| redirect("302 Found", "ftp://example.com/x", &[])).await;

    let err = Client::new()
        .get(format!("{}/start", base))
        .follow(1)
        .send()
        .await
        .unwrap_err();
    assert_eq!(err, NetError::InvalidRedirect);
}
