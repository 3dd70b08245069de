//! External navigation targets shown in the info panel. The viewer never
//! fetches these; they are plain links.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left alone by a browser's `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Characters left alone by a browser's `encodeURI`: the component set plus
/// URI delimiters.
const URI: &AsciiSet = &COMPONENT
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'#');

const METANETX_CHEM: &str = "http://www.metanetx.org/cgi-bin/mnxweb/chem_info?chem=";
const METANETX_EQUA: &str = "http://www.metanetx.org/cgi-bin/mnxweb/equa_info?equa=";
const PUBCHEM_IDENTITY: &str = "https://pubchem.ncbi.nlm.nih.gov/search/#collection=compounds&query_type=structure&query_subtype=identity&query=";
const GOOGLE_SEARCH: &str = "http://www.google.com/search?q=";
const SELENZYME: &str = "http://selenzyme.synbiochem.co.uk/results?smarts=";

pub fn encode_uri(value: &str) -> String {
    utf8_percent_encode(value, URI).to_string()
}

pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// MetaNetX page for a compound name of the form `MNXM…`.
pub fn compound_accession(name: &str) -> Option<String> {
    name.starts_with("MNXM")
        .then(|| format!("{}{}", METANETX_CHEM, name))
}

/// MetaNetX page for a rule id of the form `MNXR…_<suffix>`; the link uses
/// the part before the first underscore.
pub fn rule_accession(rule_id: &str) -> Option<String> {
    if !rule_id.starts_with("MNXR") {
        return None;
    }
    let reaction = rule_id.split('_').next().unwrap_or(rule_id);
    Some(format!("{}{}", METANETX_EQUA, reaction))
}

pub fn pubchem_identity(structure: &str) -> String {
    format!("{}{}", PUBCHEM_IDENTITY, encode_uri(structure))
}

pub fn web_search(query: &str) -> String {
    format!("{}{}", GOOGLE_SEARCH, encode_uri(query))
}

pub fn selenzyme(reaction_smiles: &str) -> String {
    format!("{}{}", SELENZYME, encode_uri_component(reaction_smiles))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoders_match_browser_behavior() {
        assert_eq!(encode_uri("C(=O)O [Na+]"), "C(=O)O%20%5BNa+%5D");
        assert_eq!(encode_uri("InChI=1S/CH4/h1H4"), "InChI=1S/CH4/h1H4");
        assert_eq!(
            encode_uri_component("[CH3:1][OH:2]>>C=O"),
            "%5BCH3%3A1%5D%5BOH%3A2%5D%3E%3EC%3DO"
        );
        assert_eq!(encode_uri_component("a-b_c.d!e~f*g'h(i)"), "a-b_c.d!e~f*g'h(i)");
    }

    #[test]
    fn test_accession_links() {
        assert_eq!(
            compound_accession("MNXM1234567").as_deref(),
            Some("http://www.metanetx.org/cgi-bin/mnxweb/chem_info?chem=MNXM1234567")
        );
        assert!(compound_accession("glucose").is_none());
        assert_eq!(
            rule_accession("MNXR94682_rule2_x").as_deref(),
            Some("http://www.metanetx.org/cgi-bin/mnxweb/equa_info?equa=MNXR94682")
        );
        assert!(rule_accession("RR-02-abc").is_none());
    }

    #[test]
    fn test_search_links() {
        assert_eq!(
            selenzyme("C>>O"),
            "http://selenzyme.synbiochem.co.uk/results?smarts=C%3E%3EO"
        );
        assert_eq!(
            web_search("XLYOFNOQVPJJNP-UHFFFAOYSA-N"),
            "http://www.google.com/search?q=XLYOFNOQVPJJNP-UHFFFAOYSA-N"
        );
        assert!(pubchem_identity("C#N").ends_with("query=C#N"));
    }
}
