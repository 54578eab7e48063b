//! Extract the readable article from an HTML document.
//!
//! The crate reads an HTML file, parses it into a [`Document`], runs a
//! readability-style scoring pipeline over a working copy of it and produces
//! an [`Article`], which can then be written to disk as JSON.
//!
//! ```no_run
//! use extract_article::{Document, Extractor, read_html, write_json};
//!
//! let html = read_html("page.html")?;
//! let document = Document::parse(&html);
//! let article = Extractor::default().extract(&document)?;
//! write_json(article.as_ref(), "page.html.simple.json")?;
//! # Ok::<(), extract_article::Error>(())
//! ```

use {
  article_fragment::ArticleFragment,
  context::{Context, Outcome},
  ego_tree::{NodeId, NodeRef},
  flags::Flags,
  metadata::Metadata,
  pipeline::Pipeline,
  regex::Regex,
  scraper::{ElementRef, Html, Node, Selector},
  serde::{Deserialize, Serialize},
  serde_json::Value,
  stage::{
    ArticleStage, CleanClassAttributesStage, CleanConditionallyStage,
    ElementLimitStage, LanguageStage, MetadataStage,
    NormalizeArticleHeadingsStage, RemoveDisallowedNodesStage,
    RemoveHiddenElementsStage, RemoveNonContentElementsStage,
    RemoveUnlikelyCandidatesStage, Stage, StripPresentationalAttributesStage,
    TitleStage,
  },
  std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::LazyLock,
  },
  tracing::{debug, trace},
};

pub use crate::{
  article::Article,
  document::Document,
  error::Error,
  extractor::Extractor,
  options::{ExtractorOptions, ExtractorOptionsBuilder},
  reader::read_html,
  writer::write_json,
};

mod article;
mod article_fragment;
mod context;
mod document;
mod error;
mod extractor;
mod flags;
mod metadata;
mod options;
mod pipeline;
mod re;
mod reader;
mod stage;
mod text;
mod writer;

pub type Result<T = (), E = Error> = std::result::Result<T, E>;
