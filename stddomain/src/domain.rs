use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use stddomain_codec as codec;
use stddomain_suffix::{Split, SuffixList};

use crate::error::DomainError;

/// Compatibility name for [`Domain`].
pub type ParsedDomain = Domain;

/// Native-script projection, only present for internationalized names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct NativeParts {
    split: Split,
    /// Suffix after an encode/decode round trip through the codec.
    suffix: String,
}

/// Standardized domain name, with full support for IDNs and punycodes.
///
/// Both the ASCII-compatible ("punycode") and the native-script form are
/// computed once at construction. The value renders as the punycode form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Domain {
    encoded_form: String,
    native_form: String,
    is_idn: bool,
    encoded: Split,
    native: Option<NativeParts>,
}

impl Domain {
    /// Parse a domain name using the bundled public suffix list.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        DomainParser::default().parse(raw)
    }

    /// Parse a UTF-8 encoded domain name using the bundled public suffix list.
    pub fn parse_bytes(raw: &[u8]) -> Result<Self, DomainError> {
        DomainParser::default().parse_bytes(raw)
    }

    /// The registrable label, e.g. `example` for `www.example.com`.
    ///
    /// With `idn` set, internationalized names return the native-script label.
    pub fn get_domain(&self, idn: bool) -> &str {
        match self.native_parts(idn) {
            Some(native) => &native.split.domain,
            None => &self.encoded.domain,
        }
    }

    /// The public suffix, e.g. `co.uk` for `www.example.co.uk`.
    ///
    /// With `idn` set, internationalized names return the native-script suffix.
    pub fn get_tld(&self, idn: bool) -> &str {
        match self.native_parts(idn) {
            Some(native) => &native.suffix,
            None => &self.encoded.suffix,
        }
    }

    /// Everything left of the registrable label, or an empty string.
    pub fn get_subdomain(&self, idn: bool) -> &str {
        match self.native_parts(idn) {
            Some(native) => &native.split.subdomain,
            None => &self.encoded.subdomain,
        }
    }

    /// The registrable name in punycode form.
    pub fn domain(&self) -> String {
        format!("{}.{}", self.get_domain(false), self.get_tld(false))
    }

    /// The registrable name in its native script, or [`Domain::domain`] if it isn't an IDN.
    pub fn idn(&self) -> String {
        if !self.is_idn {
            return self.domain();
        }
        format!("{}.{}", self.get_domain(true), self.get_tld(true))
    }

    pub fn is_idn(&self) -> bool {
        self.is_idn
    }

    /// The full host, every label ASCII-compatible encoded.
    pub fn encoded_form(&self) -> &str {
        &self.encoded_form
    }

    /// The full host in native script.
    pub fn native_form(&self) -> &str {
        &self.native_form
    }

    fn native_parts(&self, idn: bool) -> Option<&NativeParts> {
        if idn { self.native.as_ref() } else { None }
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.get_domain(false), self.get_tld(false))
    }
}

impl FromStr for Domain {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Domain {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<&[u8]> for Domain {
    type Error = DomainError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::parse_bytes(value)
    }
}

/// Builds [`Domain`] values against a public suffix list.
#[derive(Debug, Clone, Copy)]
pub struct DomainParser<'a> {
    suffixes: &'a SuffixList,
}

impl Default for DomainParser<'static> {
    fn default() -> Self {
        Self::new(SuffixList::bundled())
    }
}

impl<'a> DomainParser<'a> {
    pub fn new(suffixes: &'a SuffixList) -> Self {
        Self { suffixes }
    }

    pub fn parse_bytes(&self, raw: &[u8]) -> Result<Domain, DomainError> {
        self.parse(std::str::from_utf8(raw)?)
    }

    pub fn parse(&self, raw: &str) -> Result<Domain, DomainError> {
        // Label signal: some label carries the encoding marker and must decode.
        let mut marked = false;
        let mut labels: Vec<Cow<'_, str>> = Vec::new();
        for label in codec::split_labels(raw) {
            if codec::has_ace_marker(label) {
                marked = true;
                labels.push(Cow::Owned(codec::decode(label)?));
            } else {
                labels.push(Cow::Borrowed(label));
            }
        }

        // Whole-host decode; failing here only means there is no candidate.
        let candidate = match codec::decode(raw) {
            Ok(native) => Some(native),
            Err(e) => {
                tracing::trace!("no native candidate for {}: {}", raw, e);
                None
            }
        };

        // Script signal: anything outside ASCII.
        let (is_idn, encoded_form, native_form) = match (raw.is_ascii(), marked) {
            (false, _) => (true, codec::encode(raw)?, raw.to_string()),
            (true, true) => (
                true,
                raw.to_string(),
                candidate.unwrap_or_else(|| labels.join(".")),
            ),
            (true, false) => (false, raw.to_string(), raw.to_string()),
        };

        let encoded = self.suffixes.split(&encoded_form);
        let native = if is_idn {
            let split = self.suffixes.split(&native_form);
            let suffix = round_trip(&split.suffix)?;
            Some(NativeParts { split, suffix })
        } else {
            None
        };

        tracing::debug!(
            "parsed {} (idn: {}, encoded: {}, native: {})",
            raw,
            is_idn,
            encoded_form,
            native_form
        );

        Ok(Domain {
            encoded_form,
            native_form,
            is_idn,
            encoded,
            native,
        })
    }
}

/// Re-derive a native suffix through the codec, so encoded suffix labels come back in native script.
fn round_trip(suffix: &str) -> Result<String, DomainError> {
    if suffix.is_empty() {
        return Ok(String::new());
    }
    Ok(codec::decode(&codec::encode(suffix)?)?)
}

#[cfg(test)]
#[path = "domain_tests.rs"]
mod domain_tests;
