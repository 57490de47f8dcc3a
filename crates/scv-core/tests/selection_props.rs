use proptest::prelude::*;
use scv_core::{
    latest, normalize, select_for_update, Action, ArtifactRecord, ProductDescription,
    ProvisioningArtifactSummary,
};
use semver::Version;

fn version_triple() -> impl Strategy<Value = (u64, u64, u64)> {
    (0..4u64, 0..20u64, 0..20u64)
}

fn build(triples: &[(u64, u64, u64)]) -> Vec<ArtifactRecord> {
    triples
        .iter()
        .enumerate()
        .map(|(i, (major, minor, patch))| {
            ArtifactRecord::new(
                "prod-abcdef1234567",
                format!("pa-{i:04}"),
                Version::new(*major, *minor, *patch),
                format!("artifact {i}"),
            )
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_normalize_keeps_order_and_strips_marker(
        names in proptest::collection::vec(
            (proptest::sample::select(vec!['v', 'V', 'r']), version_triple()),
            0..30,
        )
    ) {
        let summaries: Vec<ProvisioningArtifactSummary> = names
            .iter()
            .enumerate()
            .map(|(i, (marker, (major, minor, patch)))| {
                ProvisioningArtifactSummary::new(
                    format!("pa-{i:04}"),
                    format!("{marker}{major}.{minor}.{patch}"),
                    format!("release {i}"),
                )
            })
            .collect();
        let description = ProductDescription::new("prod-abcdef1234567", summaries);

        let records = normalize(&description).unwrap();

        prop_assert_eq!(records.len(), names.len());
        for (i, (record, (_, (major, minor, patch)))) in records.iter().zip(&names).enumerate() {
            prop_assert_eq!(&record.product_id, "prod-abcdef1234567");
            prop_assert_eq!(&record.artifact_id, &format!("pa-{i:04}"));
            prop_assert_eq!(&record.version, &Version::new(*major, *minor, *patch));
            prop_assert_eq!(&record.description, &format!("release {i}"));
        }
    }

    #[test]
    fn prop_latest_is_componentwise_max(
        triples in proptest::collection::vec(version_triple(), 1..30)
    ) {
        let records = build(&triples);
        let chosen = latest(&records).unwrap();
        let max = triples.iter().max().unwrap();

        prop_assert_eq!(
            (chosen.version.major, chosen.version.minor, chosen.version.patch),
            *max
        );

        // First occurrence of the maximum wins
        let first_idx = triples.iter().position(|t| t == max).unwrap();
        prop_assert_eq!(&chosen.artifact_id, &format!("pa-{first_idx:04}"));
    }

    #[test]
    fn prop_all_returns_everything_in_order(
        triples in proptest::collection::vec(version_triple(), 0..30)
    ) {
        let records = build(&triples);
        let selected = select_for_update(&records, Action::All).unwrap();
        prop_assert_eq!(selected, records.iter().collect::<Vec<_>>());
    }

    #[test]
    fn prop_all_except_latest_drops_exactly_latest(
        triples in proptest::collection::vec(version_triple(), 1..30)
    ) {
        let records = build(&triples);
        let latest_id = latest(&records).unwrap().artifact_id.clone();
        let selected = select_for_update(&records, Action::AllExceptLatest).unwrap();

        prop_assert_eq!(selected.len(), records.len() - 1);
        prop_assert!(selected.iter().all(|r| r.artifact_id != latest_id));

        let expected: Vec<&ArtifactRecord> =
            records.iter().filter(|r| r.artifact_id != latest_id).collect();
        prop_assert_eq!(selected, expected);
    }
}

#[test]
fn numeric_not_lexicographic() {
    let records = build(&[(1, 1, 9), (1, 1, 10)]);
    assert_eq!(latest(&records).unwrap().version, Version::new(1, 1, 10));

    let records = build(&[(1, 1, 13), (1, 1, 10), (1, 1, 14)]);
    assert_eq!(latest(&records).unwrap().version, Version::new(1, 1, 14));
}
