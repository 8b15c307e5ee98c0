use std::collections::HashMap;

use crate::model::{Asn, GeoFeature};

/// Features sharing one ASN
#[derive(Debug, Clone, PartialEq)]
pub struct AsnGroup<'a> {
    pub asn: &'a Asn,
    pub members: Vec<&'a GeoFeature>,
}

impl AsnGroup<'_> {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Partition features by ASN, groups ordered by first appearance
pub fn group_by_asn(features: &[GeoFeature]) -> Vec<AsnGroup<'_>> {
    let mut slots: HashMap<&Asn, usize> = HashMap::new();
    let mut groups: Vec<AsnGroup<'_>> = Vec::new();

    for feature in features {
        let asn = feature.asn();
        let slot = *slots.entry(asn).or_insert_with(|| {
            groups.push(AsnGroup {
                asn,
                members: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].members.push(feature);
    }

    groups
}

/// Order groups by descending size; equal sizes keep their relative order
pub fn rank_groups(groups: &mut [AsnGroup<'_>]) {
    groups.sort_by(|a, b| b.len().cmp(&a.len()));
}
