//! PubMed EFetch XML 的寬鬆擷取
//!
//! 以正規表達式找出每個 `<PubmedArticle>` 區塊，逐欄位取第一個符合的標籤，
//! 缺少的欄位一律使用預設值。第 i 個區塊對應 ID 列表中的第 i 個 ID，
//! 此對應關係並未以區塊內的 PMID 驗證。

use crate::domain::model::NormalizedArticle;
use crate::domain::ports::RecordExtractor;
use crate::utils::error::Result;
use regex::Regex;

pub const DETAIL_BASE_URL: &str = "https://pubmed.ncbi.nlm.nih.gov/";
pub const ARTICLE_KIND: &str = "research-article";
pub const ARTICLE_ORIGIN: &str = "NCBI PubMed";

const DEFAULT_TITLE: &str = "No title available";
const DEFAULT_AUTHORS: &str = "Unknown authors";
const DEFAULT_ABSTRACT: &str = "No abstract available";
const MAX_AUTHORS: usize = 3;
const ABSTRACT_LIMIT: usize = 300;

pub struct RegexRecordExtractor {
    block: Regex,
    title: Regex,
    author: Regex,
    last_name: Regex,
    fore_name: Regex,
    pub_date: Regex,
    year: Regex,
    journal: Regex,
    abstract_text: Regex,
    markup: Regex,
}

impl RegexRecordExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            block: Regex::new(r"(?s)<PubmedArticle>.*?</PubmedArticle>")?,
            title: Regex::new(r"(?s)<ArticleTitle>(.*?)</ArticleTitle>")?,
            // 與 <AuthorList> 也會相符，取到的仍是第一位作者的內容
            author: Regex::new(r"(?s)<Author[^>]*>.*?</Author>")?,
            last_name: Regex::new(r"<LastName>(.*?)</LastName>")?,
            fore_name: Regex::new(r"<ForeName>(.*?)</ForeName>")?,
            pub_date: Regex::new(r"(?s)<PubDate>(.*?)</PubDate>")?,
            year: Regex::new(r"<Year>([0-9]{4})</Year>")?,
            journal: Regex::new(r"<Title>(.*?)</Title>")?,
            abstract_text: Regex::new(r"(?s)<AbstractText[^>]*>(.*?)</AbstractText>")?,
            markup: Regex::new(r"<[^>]*>")?,
        })
    }

    /// 未正常結束的紀錄會與下一筆合併成同一個區塊，欄位仍取第一個符合者
    fn extract_block(&self, block: &str, identifier: String) -> Result<NormalizedArticle> {
        let title = self
            .first_capture(&self.title, block)
            .map(|raw| self.strip_markup(raw))
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        let journal = self
            .first_capture(&self.journal, block)
            .unwrap_or_default()
            .to_string();

        let publication_year = self
            .first_capture(&self.pub_date, block)
            .and_then(|container| self.first_capture(&self.year, container))
            .unwrap_or_default()
            .to_string();

        let abstract_summary = match self.first_capture(&self.abstract_text, block) {
            Some(raw) => {
                let text = self.strip_markup(raw);
                let mut summary: String = text.chars().take(ABSTRACT_LIMIT).collect();
                summary.push_str("...");
                summary
            }
            None => DEFAULT_ABSTRACT.to_string(),
        };

        let detail_url = format!("{}{}/", DETAIL_BASE_URL, identifier);

        Ok(NormalizedArticle {
            identifier,
            title,
            authors: self.extract_authors(block),
            journal,
            publication_year,
            abstract_summary,
            detail_url,
            kind: ARTICLE_KIND.to_string(),
            origin: ARTICLE_ORIGIN.to_string(),
        })
    }

    fn extract_authors(&self, block: &str) -> String {
        let names: Vec<String> = self
            .author
            .find_iter(block)
            .take(MAX_AUTHORS)
            .map(|entry| {
                let entry = entry.as_str();
                [
                    self.first_capture(&self.fore_name, entry),
                    self.first_capture(&self.last_name, entry),
                ]
                .into_iter()
                .flatten()
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
            })
            .filter(|name| !name.is_empty())
            .collect();

        if names.is_empty() {
            DEFAULT_AUTHORS.to_string()
        } else {
            names.join(", ")
        }
    }

    fn first_capture<'a>(&self, pattern: &Regex, haystack: &'a str) -> Option<&'a str> {
        pattern
            .captures(haystack)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    fn strip_markup(&self, raw: &str) -> String {
        self.markup.replace_all(raw, "").into_owned()
    }
}

impl RecordExtractor for RegexRecordExtractor {
    fn extract(&self, document: &str, identifiers: &[String]) -> Vec<NormalizedArticle> {
        let mut articles = Vec::new();

        for (index, block) in self.block.find_iter(document).enumerate() {
            let identifier = identifiers.get(index).cloned().unwrap_or_default();
            match self.extract_block(block.as_str(), identifier) {
                Ok(article) => articles.push(article),
                Err(e) => {
                    tracing::warn!("⚠️ Skipping record block {}: {}", index, e);
                }
            }
        }

        if articles.len() != identifiers.len() {
            tracing::debug!(
                "Extracted {} articles for {} identifiers",
                articles.len(),
                identifiers.len()
            );
        }

        articles
    }
}
