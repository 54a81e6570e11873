use std::fmt::{Debug, Formatter};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use publicsuffix::Psl as _;
use serde::Serialize;
use stddomain_codec::split_labels;

static BUNDLED_ICANN: SuffixList = SuffixList::compiled(false);
static BUNDLED_ALL: SuffixList = SuffixList::compiled(true);

const PRIVATE_BEGIN: &str = "===BEGIN PRIVATE DOMAINS===";
const PRIVATE_END: &str = "===END PRIVATE DOMAINS===";

/// A host broken up around its public suffix.
///
/// `subdomain` and `domain` are empty when the host has no labels left of the suffix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Split {
    pub subdomain: String,
    pub domain: String,
    pub suffix: String,
}

#[derive(Clone)]
enum Source {
    /// The full list compiled into the `psl` crate.
    Compiled { include_private: bool },
    /// A list parsed at runtime.
    Loaded(Arc<publicsuffix::List>),
}

/// Public suffix matcher over the public suffix list.
#[derive(Clone)]
pub struct SuffixList {
    source: Source,
}

impl Debug for SuffixList {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            Source::Compiled { include_private } => f
                .debug_struct("SuffixList")
                .field("compiled", &true)
                .field("include_private", include_private)
                .finish(),
            Source::Loaded(_) => f.debug_struct("SuffixList").field("compiled", &false).finish(),
        }
    }
}

impl SuffixList {
    const fn compiled(include_private: bool) -> Self {
        Self {
            source: Source::Compiled { include_private },
        }
    }

    /// The full public suffix list shipped with `psl`, ICANN section only.
    pub fn bundled() -> &'static SuffixList {
        &BUNDLED_ICANN
    }

    /// The full public suffix list including the private section (github.io, blogspot.com, ...).
    pub fn bundled_with_private() -> &'static SuffixList {
        &BUNDLED_ALL
    }

    /// Load rules in public suffix list format.
    ///
    /// Rule labels are stored in ASCII-compatible form; rules the codec can't
    /// encode are skipped. Private-section rules are dropped unless `include_private` is set.
    pub fn parse(text: &str, include_private: bool) -> anyhow::Result<Self> {
        let mut rules = Vec::new();
        let mut private = false;

        for line in text.lines() {
            let line = line.trim();

            if line.contains(PRIVATE_BEGIN) {
                private = true;
                continue;
            }
            if line.contains(PRIVATE_END) {
                private = false;
                continue;
            }
            if line.is_empty() || line.starts_with("//") || (private && !include_private) {
                continue;
            }

            // Only the first token of a line is part of the rule.
            let Some(rule) = line.split_whitespace().next() else {
                continue;
            };

            match encode_rule(rule) {
                Ok(rule) => rules.push(rule),
                Err(e) => tracing::warn!("skipping public suffix rule {}: {}", rule, e),
            }
        }

        tracing::debug!("loaded {} public suffix rules", rules.len());

        let list: publicsuffix::List = rules
            .join("\n")
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid public suffix list: {:?}", e))?;

        Ok(Self {
            source: Source::Loaded(Arc::new(list)),
        })
    }

    /// Load rules from a file on disk.
    pub fn from_path(path: impl AsRef<Path>, include_private: bool) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read public suffix list {}", path.display()))?;
        Self::parse(&text, include_private)
            .with_context(|| format!("failed to load public suffix list {}", path.display()))
    }

    /// Suffix of an ASCII host and whether it came from the private section.
    fn lookup<'a>(&self, host: &'a [u8]) -> Option<(&'a [u8], bool)> {
        match &self.source {
            Source::Compiled { .. } => psl::suffix(host)
                .map(|s| (s.as_bytes(), s.typ() == Some(psl::Type::Private))),
            Source::Loaded(list) => list.suffix(host).map(|s| (s.as_bytes(), false)),
        }
    }

    /// Number of trailing labels that form the public suffix.
    fn suffix_len(&self, lookup_host: &str) -> usize {
        let include_private = match self.source {
            Source::Compiled { include_private } => include_private,
            Source::Loaded(_) => true,
        };

        let mut host = lookup_host.as_bytes();
        let suffix = loop {
            let Some((suffix, private)) = self.lookup(host) else {
                break None;
            };
            if !private || include_private {
                break Some(suffix);
            }
            // Fall back to the ICANN suffix underneath the private one.
            match suffix.iter().position(|b| *b == b'.') {
                Some(dot) => host = &suffix[dot + 1..],
                None => break Some(suffix),
            }
        };

        // Implicit "*" rule: an unknown top-level label is its own suffix.
        suffix.map_or(1, |s| s.iter().filter(|b| **b == b'.').count() + 1)
    }

    /// Split a host into subdomain, registrable label and suffix.
    /// Works on native and ASCII-compatible hosts alike; the parts keep the input's form.
    pub fn split(&self, host: &str) -> Split {
        let host = host
            .strip_suffix(stddomain_codec::LABEL_SEPARATORS)
            .unwrap_or(host);
        if host.is_empty() {
            return Split::default();
        }

        let labels: Vec<&str> = split_labels(host).collect();
        let lookup_host = labels
            .iter()
            .map(|l| lookup_label(l))
            .collect::<Vec<_>>()
            .join(".");

        let suffix_len = self.suffix_len(&lookup_host).min(labels.len());
        let boundary = labels.len() - suffix_len;
        let suffix = labels[boundary..].join(".");

        match boundary.checked_sub(1) {
            Some(i) => Split {
                subdomain: labels[..i].join("."),
                domain: labels[i].to_string(),
                suffix,
            },
            None => Split {
                suffix,
                ..Default::default()
            },
        }
    }
}

/// Normalize a host label to the form the list is matched in:
/// "中国" -> "xn--fiqs8s", "COM" -> "com"
fn lookup_label(label: &str) -> String {
    match stddomain_codec::encode(label) {
        Ok(ascii) if !ascii.contains('.') => ascii,
        _ => label.to_lowercase(),
    }
}

/// "!www.ck" -> "!www.ck", "*.公司.cn" -> "*.xn--55qx5d.cn"
fn encode_rule(rule: &str) -> anyhow::Result<String> {
    let (prefix, name) = match rule.strip_prefix('!') {
        Some(rest) => ("!", rest),
        None => ("", rule),
    };

    let mut labels = Vec::new();
    for label in name.split('.') {
        if label.is_empty() {
            anyhow::bail!("empty label");
        }
        if label == "*" {
            labels.push(label.to_string());
        } else {
            labels.push(stddomain_codec::encode(label)?);
        }
    }

    Ok(format!("{}{}", prefix, labels.join(".")))
}
