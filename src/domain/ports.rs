use crate::config::settings::{AssistantConfig, NasaConfig, NcbiConfig};
use crate::domain::gateway::{AssistantRequest, AssistantReply, SpaceDataRequest, SpaceDataResponse};
use crate::domain::model::{IdSearchResult, NormalizedArticle, SearchQuery};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn ncbi(&self) -> &NcbiConfig;
    fn nasa(&self) -> &NasaConfig;
    fn assistant(&self) -> &AssistantConfig;
}

/// 文獻來源：先以關鍵字搜尋 ID，再依 ID 取回原始 XML
#[async_trait]
pub trait LiteratureSource: Send + Sync {
    async fn search_ids(&self, query: &SearchQuery) -> Result<IdSearchResult>;
    async fn fetch_records(&self, query: &SearchQuery, identifiers: &[String]) -> Result<String>;
}

/// 將原始紀錄文件轉成文章列表，可替換成結構化 XML 解析器
pub trait RecordExtractor: Send + Sync {
    fn extract(&self, document: &str, identifiers: &[String]) -> Vec<NormalizedArticle>;
}

#[async_trait]
pub trait ChatGateway: Send + Sync {
    async fn complete(&self, request: &AssistantRequest) -> Result<AssistantReply>;
}

#[async_trait]
pub trait SpaceDataSource: Send + Sync {
    async fn fetch(&self, request: &SpaceDataRequest) -> Result<SpaceDataResponse>;
}
