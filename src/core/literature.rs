use crate::core::extractor::ARTICLE_ORIGIN;
use crate::domain::model::{ArticleSearchResponse, SearchQuery};
use crate::domain::ports::{LiteratureSource, RecordExtractor};
use crate::utils::error::Result;

/// 文獻查詢流程：搜尋 ID → 取回紀錄 → 擷取文章
pub struct LiteratureService<S: LiteratureSource, E: RecordExtractor> {
    source: S,
    extractor: E,
}

impl<S: LiteratureSource, E: RecordExtractor> LiteratureService<S, E> {
    pub fn new(source: S, extractor: E) -> Self {
        Self { source, extractor }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<ArticleSearchResponse> {
        tracing::info!(
            "🔎 Literature search: term='{}', db={}, retmax={}, retstart={}",
            query.term,
            query.database,
            query.retmax,
            query.retstart
        );

        let ids = self.source.search_ids(query).await?;

        // 沒有任何 ID 時不發出第二次請求
        if ids.identifiers.is_empty() {
            tracing::info!("No identifiers found for '{}'", query.term);
            return Ok(ArticleSearchResponse {
                articles: Vec::new(),
                total: 0,
                term: query.term.clone(),
                source: ARTICLE_ORIGIN.to_string(),
            });
        }

        tracing::debug!("Fetching details for {} records", ids.identifiers.len());
        let document = self.source.fetch_records(query, &ids.identifiers).await?;
        let articles = self.extractor.extract(&document, &ids.identifiers);

        tracing::info!("📚 Parsed {} articles", articles.len());

        Ok(ArticleSearchResponse {
            articles,
            total: ids.total_count,
            term: query.term.clone(),
            source: ARTICLE_ORIGIN.to_string(),
        })
    }
}
