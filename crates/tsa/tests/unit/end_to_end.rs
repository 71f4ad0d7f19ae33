//! End-to-end properties of the cumulative trace.

use proptest::prelude::*;
use tsa::{
    run_batch, Conclusion, EffectDirection, FutilityBoundaryType, MonitoringState, Study,
    TrialSequentialAnalysis, TsaResult,
};

fn three_studies() -> Vec<Study> {
    vec![
        Study::new("s1", "Smith", 1998, 12, 150, 22, 148),
        Study::new("s2", "Jones", 2003, 30, 400, 48, 402),
        Study::new("s3", "Lee", 2009, 9, 120, 15, 118),
    ]
}

fn reference_analysis() -> TrialSequentialAnalysis {
    TrialSequentialAnalysis::new()
        .alpha(0.05)
        .beta(0.20)
        .control_rate(0.15)
        .relative_risk_reduction(35.0)
        .heterogeneity_correction(1.2)
}

#[test]
fn three_study_trace_is_monotone() {
    let result = reference_analysis().run(&three_studies()).unwrap().unwrap();
    let records = &result.records;
    assert_eq!(records.len(), 3);

    for pair in records.windows(2) {
        assert!(pair[1].cumulative_patients > pair[0].cumulative_patients);
        assert!(pair[1].alpha_spent >= pair[0].alpha_spent);
        assert!(pair[1].monitoring_boundary <= pair[0].monitoring_boundary);
        assert!(pair[1].information_fraction > pair[0].information_fraction);
    }
    for record in records {
        assert!(record.alpha_spent >= 0.0 && record.alpha_spent <= 0.05);
        assert!(record.beta_spent >= 0.0 && record.beta_spent <= 0.20);
        assert!(record.odds_ratio < 1.0);
        assert!(record.ci_lower < record.odds_ratio && record.odds_ratio < record.ci_upper);
    }
}

#[test]
fn interpretation_comes_from_final_record() {
    let result = reference_analysis().run(&three_studies()).unwrap().unwrap();
    let last = result.final_record().unwrap();
    assert_eq!(
        result.conclusion(),
        Conclusion::from_state(last.state),
        "{}",
        result.interpretation
    );
}

#[test]
fn negative_z_favors_treatment() {
    let result = reference_analysis().run(&three_studies()).unwrap().unwrap();
    let last = result.final_record().unwrap();
    // Fewer events on treatment in every trial
    assert!(last.z_statistic < 0.0);
    assert_eq!(
        EffectDirection::from_z(last.z_statistic),
        EffectDirection::FavorsTreatment
    );
}

#[test]
fn empty_list_is_absent() {
    assert!(reference_analysis().run(&[]).unwrap().is_none());
}

#[test]
fn order_matters_for_the_trace_but_not_the_pool() {
    let forward = reference_analysis().run(&three_studies()).unwrap().unwrap();
    let mut reversed_studies = three_studies();
    reversed_studies.reverse();
    let reversed = reference_analysis().run(&reversed_studies).unwrap().unwrap();

    assert_ne!(
        forward.records[0].cumulative_patients,
        reversed.records[0].cumulative_patients
    );
    let a = forward.final_record().unwrap();
    let b = reversed.final_record().unwrap();
    assert_eq!(a.cumulative_patients, b.cumulative_patients);
    assert!((a.z_statistic - b.z_statistic).abs() < 1e-9);
    assert!((a.odds_ratio - b.odds_ratio).abs() < 1e-9);
}

#[test]
fn large_benefit_is_conclusive() {
    let studies = vec![
        Study::new("a", "A", 2001, 40, 1000, 80, 1000),
        Study::new("b", "B", 2004, 45, 1000, 85, 1000),
        Study::new("c", "C", 2008, 38, 1000, 82, 1000),
    ];
    let result = reference_analysis().run(&studies).unwrap().unwrap();
    assert_eq!(result.conclusion(), Conclusion::ConclusiveBenefit);
    assert_eq!(result.first_crossing, Some(0));
    assert!(result.information_size_reached());
    assert!(result
        .crossings()
        .all(|r| r.state == MonitoringState::BoundaryCrossedBenefit));
}

#[test]
fn futility_can_be_switched_off() {
    let studies = vec![
        Study::new("a", "A", 2001, 20, 250, 21, 250),
        Study::new("b", "B", 2004, 22, 260, 22, 260),
        Study::new("c", "C", 2007, 18, 200, 18, 200),
    ];
    let with = reference_analysis().run(&studies).unwrap().unwrap();
    let without = reference_analysis()
        .futility(FutilityBoundaryType::None)
        .run(&studies)
        .unwrap()
        .unwrap();

    assert_eq!(with.conclusion(), Conclusion::Futility);
    assert_eq!(without.conclusion(), Conclusion::Inconclusive);
}

fn arb_study() -> impl Strategy<Value = Study> {
    (1u64..300, 1u64..300, 1990u16..2024)
        .prop_flat_map(|(nt, nc, year)| (0..=nt, Just(nt), 0..=nc, Just(nc), Just(year)))
        .prop_map(|(et, nt, ec, nc, year)| Study::new("s", "Study", year, et, nt, ec, nc))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Batch runs agree with running each list on its own
    #[test]
    fn prop_batch_matches_single_runs(
        lists in prop::collection::vec(prop::collection::vec(arb_study(), 0..6), 1..5)
    ) {
        let analysis = reference_analysis();
        let batch = run_batch(&analysis, &lists);
        prop_assert_eq!(batch.len(), lists.len());
        let summary = |r: &TsaResult| (r.conclusion(), r.total_patients(), r.records.len());
        for (studies, batched) in lists.iter().zip(batch) {
            let single = analysis.run(studies).unwrap();
            prop_assert_eq!(batched.unwrap().as_ref().map(summary), single.as_ref().map(summary));
        }
    }
}
