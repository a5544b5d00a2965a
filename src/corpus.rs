//! HTML 语料抓取
//!
//! 读取目录下的 `*.html` 文件，提取 `<a href="...">` 链接，
//! 只保留指向语料内其他页面的链接

use crate::error::{RankError, Result};
use crate::graph::LinkGraph;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const LINK_PATTERN: &str = r#"<a\s+(?:[^>]*?)href="([^"]*)""#;

/// 抓取语料并构建链接图
///
/// 目录中没有 `.html` 文件时返回 [`RankError::EmptyGraph`]。
pub fn crawl(dir: impl AsRef<Path>) -> Result<LinkGraph<String>> {
    let links = crawl_links(dir)?;
    LinkGraph::from_links(links)
}

/// 抓取语料，返回 “页面 -> 语料内出链集合”
///
/// 不递归子目录；自链接和指向语料外部的链接都会被丢弃。
pub fn crawl_links(dir: impl AsRef<Path>) -> Result<BTreeMap<String, BTreeSet<String>>> {
    let dir = dir.as_ref();
    let pattern = Regex::new(LINK_PATTERN)?;
    let io_err = |source| RankError::Corpus {
        path: dir.to_path_buf(),
        source,
    };

    let mut pages: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) if name.ends_with(".html") => name.to_string(),
            _ => continue,
        };

        let contents = fs::read_to_string(&path).map_err(|source| RankError::Corpus {
            path: path.clone(),
            source,
        })?;

        let links: BTreeSet<String> = pattern
            .captures_iter(&contents)
            .filter_map(|cap| cap.get(1))
            .map(|m| m.as_str().to_string())
            .filter(|link| *link != name)
            .collect();

        debug!(page = %name, links = links.len(), "page parsed");
        pages.insert(name, links);
    }

    let known: BTreeSet<String> = pages.keys().cloned().collect();
    for links in pages.values_mut() {
        links.retain(|link| known.contains(link));
    }

    info!(dir = %dir.display(), pages = pages.len(), "corpus crawled");
    Ok(pages)
}
