//! Filter conversion to Qdrant `Filter`.
//!
//! Retrieval scoping is an exact keyword match on the `substance` payload
//! field; one search is scoped to exactly one substance.

use crate::record::SubstanceFilter;
use qdrant_client::qdrant::{Condition, FieldCondition, Filter, Match, condition::ConditionOneOf};
use tracing::debug;

/// Payload field carrying the substance title.
pub const SUBSTANCE_FIELD: &str = "substance";

/// Converts a [`SubstanceFilter`] to a Qdrant [`Filter`].
pub fn to_qdrant_filter(f: &SubstanceFilter) -> Filter {
    debug!("filters::to_qdrant_filter substance={}", f.substance);

    let condition = Condition {
        condition_one_of: Some(ConditionOneOf::Field(FieldCondition {
            key: SUBSTANCE_FIELD.to_string(),
            r#match: Some(Match {
                match_value: Some(qdrant_client::qdrant::r#match::MatchValue::Keyword(
                    f.substance.clone(),
                )),
            }),
            ..Default::default()
        })),
    };

    Filter {
        must: vec![condition],
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdrant_client::qdrant::r#match::MatchValue;

    #[test]
    fn filter_is_exact_keyword_match_on_substance() {
        let f = to_qdrant_filter(&SubstanceFilter {
            substance: "ACETONE".into(),
        });
        assert_eq!(f.must.len(), 1);
        let Some(ConditionOneOf::Field(fc)) = &f.must[0].condition_one_of else {
            panic!("expected field condition");
        };
        assert_eq!(fc.key, SUBSTANCE_FIELD);
        let Some(Match {
            match_value: Some(MatchValue::Keyword(kw)),
        }) = &fc.r#match
        else {
            panic!("expected keyword match");
        };
        assert_eq!(kw, "ACETONE");
    }
}
