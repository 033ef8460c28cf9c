use crate::core::resolver::CategoryResolver;
use crate::domain::model::{CrosstabMatrix, JobRecord, ProfessionEntry, OTHER};
use crate::utils::error::Result;

/// Builds the contract × category matrix, one observation per job.
///
/// An empty contract type is counted as `Other`; a profession id that does not
/// parse or has no lookup entry lands in the `Other` category. Both still
/// update every roll-up cell.
pub fn aggregate(jobs: &[JobRecord], resolver: &CategoryResolver) -> CrosstabMatrix {
    jobs.iter().fold(CrosstabMatrix::new(), |mut matrix, job| {
        let contract = if job.contract_type.is_empty() {
            OTHER
        } else {
            job.contract_type.as_str()
        };
        let category = resolver.resolve_raw(&job.profession_id);

        matrix.record(contract, category);
        matrix
    })
}

/// Row-level entry point: both tables still carry their header row.
pub fn aggregate_rows(jobs: &[Vec<String>], professions: &[Vec<String>]) -> Result<CrosstabMatrix> {
    let professions = ProfessionEntry::from_table(professions)?;
    let jobs = JobRecord::from_table(jobs)?;

    let resolver = CategoryResolver::new(&professions);
    let matrix = aggregate(&jobs, &resolver);

    tracing::debug!(
        jobs = jobs.len(),
        contracts = matrix.contracts().len() - 1,
        categories = matrix.categories().len() - 1,
        "Aggregated job postings"
    );

    Ok(matrix)
}
