//! Integration test: Edge export on disk → JSON document with resolved icons.

mod common;

use std::fs;

use bmc_core::config::{BmcConfig, IconConfig};
use bmc_core::convert::{convert_file, ConvertOptions};
use bmc_core::model::Document;
use common::site_server::{self, Route};
use tempfile::tempdir;

#[test]
fn edge_export_converts_with_icons() {
    let server = site_server::start(vec![
        (
            "/",
            Route::html(r#"<html><head><link rel="shortcut icon" href="/favicon.png"></head></html>"#),
        ),
        ("/favicon.png", Route::image(2048)),
    ]);

    let export = format!(
        r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=UTF-8">
<TITLE>Bookmarks</TITLE>
<H1>Bookmarks</H1>
<DL><p>
    <DT><H3 ADD_DATE="1700000000" LAST_MODIFIED="1700000000" PERSONAL_TOOLBAR_FOLDER="true">Favorites bar</H3>
    <DL><p>
        <DT><H3 ADD_DATE="1700000000">Work</H3>
        <DL><p>
            <DT><A HREF="{local}" ADD_DATE="1700000000">Local</A>
            <DT><A HREF="http://127.0.0.1:1/" ADD_DATE="1700000000">Dead</A>
        </DL><p>
        <DT><H3 ADD_DATE="1700000000">Code</H3>
        <DL><p>
            <DT><H3 ADD_DATE="1700000000">Rust</H3>
            <DL><p>
                <DT><A HREF="{local}" ADD_DATE="1700000000">Again</A>
            </DL><p>
        </DL><p>
    </DL><p>
</DL><p>
"#,
        local = server.url("/")
    );

    let dir = tempdir().unwrap();
    let input = dir.path().join("favorites.html");
    let output = dir.path().join("site/data.json");
    fs::write(&input, export).unwrap();

    let cfg = BmcConfig {
        icons: IconConfig {
            page_timeout_secs: 2,
            probe_timeout_secs: 1,
            favicon_service: "http://127.0.0.1:1/s2?domain={domain}".to_string(),
            ..IconConfig::default()
        },
        ..BmcConfig::default()
    };
    let options = ConvertOptions {
        workers: 2,
        offline: false,
    };
    let report = convert_file(&input, &output, &cfg, options, None).unwrap();

    assert!(report.transparent_root);
    assert_eq!(report.stats.categories, 2);
    assert_eq!(report.stats.websites, 3);
    assert_eq!(report.icons.processed, 3);
    assert_eq!(report.icons.page_link, 2);
    assert_eq!(report.icons.fallback, 1);

    let doc: Document = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let ids: Vec<&str> = doc.categories.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["work", "code"]);

    let work = &doc.categories[0];
    assert_eq!(work.sections.len(), 1);
    assert_eq!(work.sections[0].name, "默认分类");
    assert_eq!(work.sections[0].websites[0].icon, server.url("/favicon.png"));
    assert_eq!(work.sections[0].websites[0].description, "Local");
    assert_eq!(work.sections[0].websites[1].icon, "link");

    let code = &doc.categories[1];
    assert_eq!(code.sections.len(), 1);
    assert_eq!(code.sections[0].name, "Rust");
    assert_eq!(code.sections[0].websites[0].name, "Again");
}
