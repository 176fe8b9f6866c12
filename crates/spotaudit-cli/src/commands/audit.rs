use crate::cli::AuditArgs;
use crate::{errors, output};
use anyhow::Result;
use spotaudit_analysis::run_audit;
use spotaudit_core::catalog::RecordExtractor;
use spotaudit_core::config::{AuditConfig, CliConfigOverrides};
use spotaudit_core::regions::RegionTable;
use spotaudit_core::SpotauditError;

pub async fn execute(args: AuditArgs, json: bool) -> Result<()> {
    let mut config = AuditConfig::with_defaults();
    if let Some(path) = &args.config {
        config = config.load_from_file(path)?;
    }
    config = config.load_from_env();
    config.update_from_cli(CliConfigOverrides {
        min_decimal_digits: args.min_decimal_digits,
        proximity_epsilon_deg: args.proximity_epsilon_deg,
        outlier_threshold_deg: args.outlier_threshold_deg,
        ..Default::default()
    });

    let extractor = RecordExtractor::new()
        .with_partition_filter(args.partition_prefix.as_str(), args.partition_ext.as_str());
    let records = match extractor.extract_dir(&args.data_dir) {
        Ok(records) => records,
        Err(SpotauditError::CatalogNotFound { path }) => {
            errors::catalog_not_found(&path).display();
            std::process::exit(1);
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!("extracted {} records from {}", records.len(), args.data_dir.display());

    let table = RegionTable::japan();
    let report = run_audit(&records, &table, &config);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::render_report(&report);
    }

    // Issues found is a successful audit; the report is the product.
    Ok(())
}
