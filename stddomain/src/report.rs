use serde::Serialize;
use stddomain::Domain;

/// One line of output per parsed domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report<'a> {
    pub input: &'a str,
    pub domain: String,
    pub idn: String,
    pub is_idn: bool,
    pub tld: &'a str,
    pub idn_tld: &'a str,
    pub subdomain: &'a str,
}

impl<'a> Report<'a> {
    pub fn new(input: &'a str, domain: &'a Domain) -> Self {
        Self {
            input,
            domain: domain.domain(),
            idn: domain.idn(),
            is_idn: domain.is_idn(),
            tld: domain.get_tld(false),
            idn_tld: domain.get_tld(true),
            subdomain: domain.get_subdomain(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_json() {
        let domain = Domain::parse("www.名がドメイン.中国").unwrap();
        let value = serde_json::to_value(Report::new("www.名がドメイン.中国", &domain)).unwrap();

        assert_eq!(value["domain"], "xn--v8jxj3d1dzdz08w.xn--fiqs8s");
        assert_eq!(value["idn"], "名がドメイン.中国");
        assert_eq!(value["is_idn"], true);
        assert_eq!(value["tld"], "xn--fiqs8s");
        assert_eq!(value["idn_tld"], "中国");
        assert_eq!(value["subdomain"], "www");
    }
}
