use anyhow::Result;
use contract_crosstab::core::Pipeline;
use contract_crosstab::{
    CliConfig, CrosstabPipeline, EtlEngine, EtlError, LocalStorage, TomlConfig, TOTAL,
};
use std::path::Path;
use tempfile::TempDir;

const JOBS: &str = "\
profession_id,contract_type,name,office_latitude,office_longitude
7,FULL_TIME,Backend engineer,48.8,2.3
7,INTERNSHIP,Data intern,48.8,2.3
12,FULL_TIME,Account manager,45.7,4.8
,FULL_TIME,Mystery role,0,0
99,,Unknown contract,0,0
12,FREELANCE,Sales consultant,43.3,5.4
7,FULL_TIME,Frontend engineer,48.8,2.3
";

const PROFESSIONS: &str = "\
id,name,category_name
7,Developer,Tech
12,Account Manager,Business
";

fn write_inputs(dir: &Path) {
    std::fs::write(dir.join("jobs.csv"), JOBS).unwrap();
    std::fs::write(dir.join("professions.csv"), PROFESSIONS).unwrap();
}

fn cli_config(dir: &Path, output: Option<&str>) -> CliConfig {
    CliConfig {
        jobs: "jobs.csv".to_string(),
        professions: "professions.csv".to_string(),
        output: output.map(str::to_string),
        output_dir: dir.to_str().unwrap().to_string(),
        ..CliConfig::default()
    }
}

#[tokio::test]
async fn test_end_to_end_writes_grid_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_inputs(temp_dir.path());

    let config = cli_config(temp_dir.path(), Some("crosstab.txt"));
    let storage = LocalStorage::new(temp_dir.path());
    let engine = EtlEngine::new(CrosstabPipeline::new(storage, config));

    let destination = engine.run().await?;
    assert_eq!(destination, "crosstab.txt");

    let grid = std::fs::read_to_string(temp_dir.path().join("crosstab.txt"))?;
    let rule = "-".repeat(46);
    let expected = [
        rule.as_str(),
        "|          | TOTAL | Tech | Business | Other |",
        rule.as_str(),
        "|TOTAL     |   7   |  3   |    2     |   2   |",
        rule.as_str(),
        "|FULL_TIME |   4   |  2   |    1     |   1   |",
        rule.as_str(),
        "|INTERNSHIP|   1   |  1   |    0     |   0   |",
        rule.as_str(),
        "|Other     |   1   |  0   |    0     |   1   |",
        rule.as_str(),
        "|FREELANCE |   1   |  0   |    1     |   0   |",
        rule.as_str(),
    ]
    .join("\n")
        + "\n";

    assert_eq!(grid, expected);
    Ok(())
}

#[tokio::test]
async fn test_report_totals_are_consistent() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_inputs(temp_dir.path());

    let config = cli_config(temp_dir.path(), None);
    let pipeline = CrosstabPipeline::new(LocalStorage::new(temp_dir.path()), config);

    let tables = pipeline.extract().await?;
    let report = pipeline.transform(tables).await?;
    let matrix = &report.matrix;

    assert_eq!(report.job_count, 7);
    assert_eq!(matrix.grand_total(), 7);
    assert_eq!(
        matrix.contracts(),
        &[TOTAL, "FULL_TIME", "INTERNSHIP", "Other", "FREELANCE"]
    );
    assert_eq!(matrix.categories(), &[TOTAL, "Tech", "Business", "Other"]);

    for contract in &matrix.contracts()[1..] {
        let sum: u64 = matrix.categories()[1..]
            .iter()
            .map(|category| matrix.count(contract, category))
            .sum();
        assert_eq!(sum, matrix.count(contract, TOTAL));
    }
    for category in &matrix.categories()[1..] {
        let sum: u64 = matrix.contracts()[1..]
            .iter()
            .map(|contract| matrix.count(contract, category))
            .sum();
        assert_eq!(sum, matrix.count(TOTAL, category));
    }

    Ok(())
}

#[tokio::test]
async fn test_toml_config_drives_pipeline() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let data_dir = temp_dir.path().join("data");
    std::fs::create_dir_all(&data_dir)?;
    std::fs::write(
        data_dir.join("jobs.tsv"),
        JOBS.replace(',', "\t"),
    )?;
    std::fs::write(
        data_dir.join("professions.tsv"),
        PROFESSIONS.replace(',', "\t"),
    )?;

    let toml_content = format!(
        r#"
[pipeline]
name = "tsv-integration"

[source]
jobs_file = "data/jobs.tsv"
professions_file = "data/professions.tsv"
delimiter = "\t"

[load]
base_path = "{}"
output_file = "out/crosstab_{{timestamp}}.txt"
"#,
        temp_dir.path().to_str().unwrap().replace('\\', "/")
    );

    let config = TomlConfig::from_toml_str(&toml_content)?;
    let storage = LocalStorage::new(config.base_path());
    let engine = EtlEngine::new(CrosstabPipeline::new(storage, config));

    let destination = engine.run().await?;
    assert!(destination.starts_with("out/crosstab_"));
    assert!(!destination.contains("{timestamp}"));

    let grid = std::fs::read_to_string(temp_dir.path().join(&destination))?;
    assert!(grid.contains("|FULL_TIME |   4   |  2   |    1     |   1   |"));

    Ok(())
}

#[tokio::test]
async fn test_missing_input_file_fails_with_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let config = cli_config(temp_dir.path(), None);
    let engine = EtlEngine::new(CrosstabPipeline::new(
        LocalStorage::new(temp_dir.path()),
        config,
    ));

    let result = engine.run().await;

    let err = result.unwrap_err();
    assert!(matches!(err, EtlError::IoError(_)));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn test_short_profession_rows_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("jobs.csv"), JOBS).unwrap();
    std::fs::write(
        temp_dir.path().join("professions.csv"),
        "id,name\n7,Developer\n",
    )
    .unwrap();

    let config = cli_config(temp_dir.path(), None);
    let engine = EtlEngine::new(CrosstabPipeline::new(
        LocalStorage::new(temp_dir.path()),
        config,
    ));

    let err = engine.run().await.unwrap_err();
    assert!(matches!(
        err,
        EtlError::MalformedRow {
            expected: 3,
            found: 2,
            ..
        }
    ));
}
