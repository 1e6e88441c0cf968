use aktau_tt_schedule::tt_schedule::models::{Args, Config};
use aktau_tt_schedule::tt_schedule::run_tool::run;
use clap::Parser;
use figment::{
    providers::{Env, Format, Json},
    Figment,
};
use log::info;

#[tokio::main]
async fn main() {
    /* Setup logging */
    env_logger::builder()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .init();

    /* Get all the required resources */
    let args = Args::parse();
    let http_client = reqwest::Client::new();
    let config: Config = Figment::new()
        .merge(Json::file(&args.config_json_path))
        .merge(Env::prefixed("TT_"))
        .extract()
        .unwrap();
    info!(
        "Read config.json from {}",
        std::path::absolute(&args.config_json_path)
            .unwrap()
            .display()
    );

    /* Fetch and normalize the timetable */
    let schedule = run(&http_client, &config, &args.token).await.unwrap();

    /* Hand the result to the caller */
    println!("{}", serde_json::to_string_pretty(&schedule).unwrap());
}
