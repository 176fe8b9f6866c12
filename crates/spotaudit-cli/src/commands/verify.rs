use crate::cli::VerifyArgs;
use crate::output;
use anyhow::Result;
use spotaudit_core::config::{AuditConfig, CliConfigOverrides};
use spotaudit_verify::{LocationVerifier, NominatimClient};

pub async fn execute(args: VerifyArgs, json: bool) -> Result<()> {
    let mut config = AuditConfig::with_defaults();
    if let Some(path) = &args.config {
        config = config.load_from_file(path)?;
    }
    config = config.load_from_env();
    config.update_from_cli(CliConfigOverrides {
        lookup_base_url: args.base_url.clone(),
        lookup_timeout_secs: args.timeout_secs,
        ..Default::default()
    });

    let client = NominatimClient::from_config(&config)?;
    let verifier = LocationVerifier::new(client);
    let verdict = verifier.verify(args.latitude, args.longitude).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
    } else {
        output::render_verdict(&verdict);
    }

    Ok(())
}
