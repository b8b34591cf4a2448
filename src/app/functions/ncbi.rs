use crate::app::functions::{parse_body, ProxyResponse};
use crate::core::extractor::RegexRecordExtractor;
use crate::core::literature::LiteratureService;
use crate::domain::model::SearchQuery;
use crate::domain::ports::LiteratureSource;
use crate::utils::error::Result;
use serde::Deserialize;
use serde_json::json;

pub const FUNCTION_NAME: &str = "fetch-ncbi-data";

#[derive(Debug, Default, Deserialize)]
struct NcbiRequest {
    term: Option<String>,
    database: Option<String>,
    retmax: Option<u32>,
    retstart: Option<u32>,
}

impl NcbiRequest {
    fn into_query(self, default_database: &str) -> SearchQuery {
        let defaults = SearchQuery::default();
        SearchQuery {
            term: self.term.unwrap_or(defaults.term),
            database: self
                .database
                .unwrap_or_else(|| default_database.to_string()),
            retmax: self.retmax.unwrap_or(defaults.retmax),
            retstart: self.retstart.unwrap_or(defaults.retstart),
        }
    }
}

pub(crate) fn parse_query(body: Option<&str>, default_database: &str) -> Result<SearchQuery> {
    let request: NcbiRequest = parse_body(body)?;
    Ok(request.into_query(default_database))
}

/// 任何失敗都回傳 500 與 `{ error, source: "NCBI" }`，不回傳部分結果
pub async fn fetch_ncbi_data<S: LiteratureSource>(
    service: &LiteratureService<S, RegexRecordExtractor>,
    default_database: &str,
    body: Option<&str>,
) -> ProxyResponse {
    let result = match parse_query(body, default_database) {
        Ok(query) => service.search(&query).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(response) => ProxyResponse::json(200, &response),
        Err(e) => {
            tracing::error!("❌ Error in {} function: {}", FUNCTION_NAME, e);
            ProxyResponse::json(500, &json!({ "error": e.to_string(), "source": "NCBI" }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let query = parse_query(None, "pubmed").unwrap();
        assert_eq!(query, SearchQuery::default());
    }

    #[test]
    fn test_query_overrides() {
        let query = parse_query(
            Some(r#"{"term":"tardigrade","retmax":15,"retstart":30}"#),
            "pmc",
        )
        .unwrap();

        assert_eq!(query.term, "tardigrade");
        assert_eq!(query.database, "pmc");
        assert_eq!(query.retmax, 15);
        assert_eq!(query.retstart, 30);
    }
}
