// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

pub mod server;
pub mod template;

#[cfg(test)]
mod tests {
    use std::fs::create_dir_all;
    use std::fs::write;
    use std::path::PathBuf;

    use portpicker::pick_unused_port;
    use reqwest::StatusCode;
    use tempfile::TempDir;
    use tempfile::tempdir;
    use tokio::spawn;
    use uebungen_core::Fallible;

    use crate::cmd::serve::server::ServerConfig;
    use crate::cmd::serve::server::resolve_pkg_file;
    use crate::cmd::serve::server::start_server;
    use crate::utils::wait_for_server;

    const TEST_HOST: &str = "127.0.0.1";

    const LESSON: &str = r#"{
        "number": 4,
        "title": "Nebensätze",
        "exercises": [
            {"type": "choice", "sentence": "___ ich klein war", "options": ["als", "wenn"], "answer": "als"},
            {"type": "order", "sentence": ["Hause", "Ich", "gehe", "nach"], "answer": ["Ich", "gehe", "nach", "Hause"]}
        ]
    }"#;

    fn lesson_dir() -> Fallible<(TempDir, String)> {
        let dir = tempdir()?;
        let path = dir.path().join("lesson-04.json");
        write(&path, LESSON)?;
        Ok((dir, path.display().to_string()))
    }

    fn config(lesson: String, port: u16, pkg_dir: Option<String>) -> ServerConfig {
        ServerConfig {
            lesson,
            host: TEST_HOST.to_string(),
            port,
            pkg_dir,
            seed: Some(1),
        }
    }

    #[tokio::test]
    async fn test_start_server_on_missing_lesson() -> Fallible<()> {
        let port = pick_unused_port().unwrap();
        let result = start_server(config("./derpherp.json".to_string(), port, None)).await;
        let err = result.err().unwrap();
        assert_eq!(
            err.to_string(),
            "error: lesson file does not exist: ./derpherp.json"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_start_server_on_missing_pkg_dir() -> Fallible<()> {
        let port = pick_unused_port().unwrap();
        let (_dir, lesson) = lesson_dir()?;
        let result = start_server(config(lesson, port, Some("./no-such-pkg".to_string()))).await;
        assert_eq!(
            result.err().unwrap().to_string(),
            "error: pkg directory does not exist."
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_e2e() -> Fallible<()> {
        let port = pick_unused_port().unwrap();
        let (dir, lesson) = lesson_dir()?;
        let pkg: PathBuf = dir.path().join("pkg");
        create_dir_all(&pkg)?;
        write(pkg.join("uebungen_wasm.js"), "export default function init() {}")?;
        let config = config(lesson, port, Some(pkg.display().to_string()));
        spawn(async move { start_server(config).await });
        wait_for_server(TEST_HOST, port).await?;
        let base = format!("http://{TEST_HOST}:{port}");

        // Hit the root endpoint.
        let response = reqwest::get(format!("{base}/")).await.unwrap();
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
        let html = response.text().await.unwrap();
        assert!(html.contains("<title>Lektion 4: Nebensätze</title>"));
        assert!(html.contains(r#"data-exercise-index="0""#));
        assert!(html.contains(r#"class="exercise ordering-exercise" data-exercise-index="1""#));
        assert!(html.contains(r#"id="lesson-data""#));
        assert!(html.contains(r#"id="lesson-stats""#));
        assert!(html.contains(r#"id="reset-all""#));

        // Hit the `style.css` endpoint.
        let response = reqwest::get(format!("{base}/style.css")).await.unwrap();
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        // Hit the `script.js` endpoint.
        let response = reqwest::get(format!("{base}/script.js")).await.unwrap();
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/javascript"
        );

        // Hit the lesson endpoint.
        let response = reqwest::get(format!("{base}/lesson.json")).await.unwrap();
        assert!(response.status().is_success());
        let json: serde_json::Value = serde_json::from_str(&response.text().await.unwrap())?;
        assert_eq!(json["title"], "Nebensätze");
        assert_eq!(json["exercises"].as_array().map(|a| a.len()), Some(2));

        // Hit the pkg endpoint.
        let response = reqwest::get(format!("{base}/pkg/uebungen_wasm.js")).await.unwrap();
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/javascript"
        );

        // Hit the pkg endpoint with a non-existent file.
        let response = reqwest::get(format!("{base}/pkg/uebungen_wasm_bg.wasm")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // Hit the not found endpoint.
        let response = reqwest::get(format!("{base}/herp-derp")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        Ok(())
    }

    #[tokio::test]
    async fn test_pkg_without_pkg_dir() -> Fallible<()> {
        let port = pick_unused_port().unwrap();
        let (_dir, lesson) = lesson_dir()?;
        let config = config(lesson, port, None);
        spawn(async move { start_server(config).await });
        wait_for_server(TEST_HOST, port).await?;

        let response = reqwest::get(format!("http://{TEST_HOST}:{port}/pkg/uebungen_wasm.js"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[test]
    fn test_resolve_pkg_file() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join("a.js"), "")?;
        create_dir_all(dir.path().join("snippets"))?;
        assert!(resolve_pkg_file(dir.path(), "a.js").is_some());
        assert!(resolve_pkg_file(dir.path(), "snippets").is_none());
        assert!(resolve_pkg_file(dir.path(), "missing.js").is_none());
        assert!(resolve_pkg_file(dir.path(), "../a.js").is_none());
        assert!(resolve_pkg_file(dir.path(), "./a.js").is_none());
        assert!(resolve_pkg_file(dir.path(), "/etc/passwd").is_none());
        Ok(())
    }
}
