use chrono::NaiveDate;
use httpmock::prelude::*;
use snu_menu::core::render::menu_text;
use snu_menu::{MealKind, MenuCache, MenuConfig, ReqwestTransport, ScraperExtractor};

const SNUCO_PAGE: &str = r#"<!DOCTYPE html>
<html><body><table class="menu-table">
  <thead><tr>
    <th class="title">식당</th><th class="breakfast">아침</th><th class="lunch">점심</th><th class="dinner">저녁</th>
  </tr></thead>
  <tbody>
    <tr>
      <td class="title">학생회관식당 (880-5543)</td>
      <td class="breakfast"></td>
      <td class="lunch">제육볶음<br>미역국</td>
      <td class="dinner">휴점</td>
    </tr>
    <tr>
      <td class="title">301동식당 (889-8955)</td>
      <td class="breakfast"></td>
      <td class="lunch">카레</td>
      <td class="dinner"></td>
    </tr>
    <tr>
      <td class="title">302동식당 (880-1939)</td>
      <td class="breakfast"></td>
      <td class="lunch">돈까스</td>
      <td class="dinner">우동</td>
    </tr>
  </tbody>
</table></body></html>"#;

const SNUDORM_PAGE: &str = r#"<!DOCTYPE html>
<html><body><table>
  <tr><th class="title">식당</th><th class="breakfast">아침</th><th class="lunch">점심</th><th class="dinner">저녁</th></tr>
  <tr>
    <td class="title">기숙사식당 (881-9072)</td>
    <td class="breakfast">토스트</td>
    <td class="lunch">비빔밥</td>
    <td class="dinner">김치찌개</td>
  </tr>
</table></body></html>"#;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn config_for(server: &MockServer) -> MenuConfig {
    let toml_content = format!(
        r#"
favorite = ["302동식당 (880-1939)"]
excluded = ["301동식당 (889-8955)"]
sources = ["{}", "{}"]
"#,
        server.url("/snuco/foodmenu/"),
        server.url("/snudorm/foodmenu/")
    );
    MenuConfig::from_toml_str(&toml_content).unwrap()
}

fn cache_for(server: &MockServer) -> MenuCache<ReqwestTransport, ScraperExtractor> {
    MenuCache::new(ReqwestTransport::new(), ScraperExtractor::new(), &config_for(server))
}

#[tokio::test]
async fn test_menu_from_both_sources() {
    let server = MockServer::start();
    let snuco = server.mock(|when, then| {
        when.method(GET)
            .path("/snuco/foodmenu/")
            .query_param("date", "2024-03-04");
        then.status(200).body(SNUCO_PAGE);
    });
    let snudorm = server.mock(|when, then| {
        when.method(GET)
            .path("/snudorm/foodmenu/")
            .query_param("date", "2024-03-04");
        then.status(200).body(SNUDORM_PAGE);
    });

    let cache = cache_for(&server);
    let menu = cache.get_menu(date("2024-03-04"), 0).await.unwrap();

    snuco.assert();
    snudorm.assert();
    assert_eq!(menu.names(), vec!["302동식당", "학생회관식당", "기숙사식당"]);
    assert!(menu.get("302동식당").unwrap().favorite);
    assert!(!menu.contains("301동식당"));

    assert_eq!(
        menu_text(&menu, MealKind::Lunch),
        "302동식당\n돈까스\n\n학생회관식당\n제육볶음\n미역국\n\n기숙사식당\n비빔밥\n\n"
    );
    assert_eq!(
        menu_text(&menu, MealKind::Dinner),
        "302동식당\n우동\n\n기숙사식당\n김치찌개\n\n"
    );
}

#[tokio::test]
async fn test_repeated_lookup_hits_network_once() {
    let server = MockServer::start();
    let snuco = server.mock(|when, then| {
        when.method(GET).path("/snuco/foodmenu/");
        then.status(200).body(SNUCO_PAGE);
    });
    let snudorm = server.mock(|when, then| {
        when.method(GET).path("/snudorm/foodmenu/");
        then.status(200).body(SNUDORM_PAGE);
    });

    let cache = cache_for(&server);
    let first = cache.get_menu(date("2024-03-04"), 0).await.unwrap();
    let second = cache.get_menu(date("2024-03-04"), 0).await.unwrap();

    snuco.assert_hits(1);
    snudorm.assert_hits(1);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_prefetch_window_serves_later_dates() {
    let server = MockServer::start();
    let snuco = server.mock(|when, then| {
        when.method(GET).path("/snuco/foodmenu/").query_param_exists("date");
        then.status(200).body(SNUCO_PAGE);
    });
    let snudorm = server.mock(|when, then| {
        when.method(GET).path("/snudorm/foodmenu/").query_param_exists("date");
        then.status(200).body(SNUDORM_PAGE);
    });

    let cache = cache_for(&server);
    cache.get_menu(date("2024-03-04"), 2).await.unwrap();

    snuco.assert_hits(3);
    snudorm.assert_hits(3);
    assert_eq!(
        cache.cached_dates(),
        vec![date("2024-03-04"), date("2024-03-05"), date("2024-03-06")]
    );

    let later = cache.get_menu(date("2024-03-05"), 0).await.unwrap();
    snuco.assert_hits(3);
    snudorm.assert_hits(3);
    assert_eq!(later.len(), 3);
}

#[tokio::test]
async fn test_one_failed_source_fails_whole_batch() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/snuco/foodmenu/");
        then.status(200).body(SNUCO_PAGE);
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/snudorm/foodmenu/")
            .query_param("date", "2024-03-05");
        then.status(500);
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/snudorm/foodmenu/")
            .query_param("date", "2024-03-04");
        then.status(200).body(SNUDORM_PAGE);
    });

    let cache = cache_for(&server);
    let err = cache.get_menu(date("2024-03-04"), 1).await.unwrap_err();

    assert!(err.is_transport());
    assert!(cache.is_empty());
    assert!(!cache.contains(date("2024-03-04")));
}

#[test]
fn test_blocking_lookup_without_outer_runtime() {
    let server = MockServer::start();
    let snuco = server.mock(|when, then| {
        when.method(GET).path("/snuco/foodmenu/");
        then.status(200).body(SNUCO_PAGE);
    });
    let snudorm = server.mock(|when, then| {
        when.method(GET).path("/snudorm/foodmenu/");
        then.status(200).body(SNUDORM_PAGE);
    });

    let cache = cache_for(&server);
    let menu = cache.get_menu_blocking(date("2024-03-04"), 0).unwrap();

    snuco.assert_hits(1);
    snudorm.assert_hits(1);
    assert_eq!(menu.len(), 3);
}
