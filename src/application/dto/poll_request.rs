/// PollRequest - inputs for one results-store polling invocation
#[derive(Debug, Clone)]
pub struct PollRequest {
    /// Results-store API endpoint that serves the result records
    pub resultsdb_api_url: String,
    /// NVR of the tested component
    pub nvr: String,
    /// CI tier the polled jobs belong to
    pub test_tier: u32,
    /// Job names to poll; with an empty list, results are bucketed by
    /// the job name embedded in each record
    pub job_names: Vec<String>,
}

impl PollRequest {
    pub fn new(
        resultsdb_api_url: String,
        nvr: String,
        test_tier: u32,
        job_names: Vec<String>,
    ) -> Self {
        Self {
            resultsdb_api_url,
            nvr,
            test_tier,
            job_names,
        }
    }
}
