use anyhow::Context;
use app_cli::handlers::Command;
use app_cli::shell::{Flow, Shell, describe};
use biz_client::api::HttpApiClient;
use common::config::{AppConfig, SysConfig};
use log::{LevelFilter, info, warn};
use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

const DEFAULT_CONFIG: &str = "cli-config.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 读取配置文件，可通过第一个参数覆盖路径
    let file = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let config = AppConfig::init(&file).with_context(|| format!("load config {}", file))?;
    //初始化日志
    init_log(&config.get_sys());

    let api_config = config.get_api();
    info!("using api {}", api_config.base_url);
    let api = Arc::new(HttpApiClient::new(&api_config)?);
    let mut shell = Shell::new(api.clone(), api);

    println!("{}", shell.help());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{}", shell.prompt());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!("bad input: {}", e);
                println!("{}", describe(&e));
                continue;
            }
        };

        let (flow, out) = shell.execute(command).await;
        for line in out {
            println!("{}", line);
        }
        if flow == Flow::Quit {
            break;
        }
    }
    Ok(())
}

pub fn init_log(sys: &SysConfig) {
    let level = LevelFilter::from_str(&sys.log_level).unwrap_or_else(|_| {
        eprintln!("unknown log level {}, using info", sys.log_level);
        LevelFilter::Info
    });
    env_logger::Builder::new().filter(None, level).init();
}
