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

use std::process::exit;

use clap::Parser;
use tokio::spawn;
use uebungen_core::Fallible;

use crate::cmd::check::check_lessons;
use crate::cmd::render::render_page;
use crate::cmd::serve::server::ServerConfig;
use crate::cmd::serve::server::start_server;
use crate::utils::wait_for_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Check that lesson files parse.
    Check {
        /// A lesson file, or a directory to search for lesson files. By default, the current working directory is used.
        path: Option<String>,
    },
    /// Render a lesson to a standalone HTML page.
    Render {
        /// Path to the lesson file (.json or .toml).
        lesson: String,
        /// Optional path to the output file. By default, the page is printed to stdout.
        #[arg(long)]
        output: Option<String>,
        /// Seed for scrambling ordering exercises. By default, the current time is used.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Serve a lesson page for preview in the browser.
    Serve {
        /// Path to the lesson file (.json or .toml).
        lesson: String,
        /// The host address to bind to. Default is 127.0.0.1.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// The port to use for the web server. Default is 8000.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Directory with the wasm-pack output of uebungen-wasm, served under /pkg/.
        #[arg(long)]
        pkg_dir: Option<String>,
        /// Whether to open the browser automatically. Default is true.
        #[arg(long)]
        open_browser: Option<bool>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Check { path } => check_lessons(path),
        Command::Render {
            lesson,
            output,
            seed,
        } => render_page(&lesson, output, seed),
        Command::Serve {
            lesson,
            host,
            port,
            pkg_dir,
            open_browser,
        } => {
            if open_browser.unwrap_or(true) {
                // Start a separate task to open the browser once the server is up.
                let browser_host = host.clone();
                spawn(async move {
                    match wait_for_server(&browser_host, port).await {
                        Ok(_) => {
                            let _ = open::that(format!("http://{browser_host}:{port}/"));
                        }
                        Err(e) => {
                            eprintln!("Failed to connect to server: {e}");
                            exit(-1)
                        }
                    }
                });
            }
            let config = ServerConfig {
                lesson,
                host,
                port,
                pkg_dir,
                seed: None,
            };
            start_server(config).await
        }
    }
}
