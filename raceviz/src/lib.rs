pub mod core {
    pub mod championship;
    pub mod colors;
    pub mod laps;
    pub mod qualifying;
    pub mod smoothing;
    pub mod telemetry;
    pub mod track_map;
    pub mod tyres;
}
pub mod interfaces {
    pub mod render_interface;
}
pub mod post {
    pub mod report;
}
pub mod pre {
    pub mod check_dash_opts_pars;
    pub mod dash_opts;
    pub mod read_data;
}

#[cfg(test)]
mod qualifying_tests {
    use crate::core::qualifying::{best_time, qualifying_gaps, QualifyingSegments, Segment};
    use approx::assert_abs_diff_eq;
    use helpers::general::AnalysisError;

    fn segs(driver: &str, q1: Option<f64>, q2: Option<f64>, q3: Option<f64>) -> QualifyingSegments {
        QualifyingSegments {
            driver: driver.to_owned(),
            team: String::new(),
            q1,
            q2,
            q3,
        }
    }

    #[test]
    fn test_best_time_prefers_q3_even_if_slower() {
        let s = segs("VER", Some(89.0), Some(88.5), Some(89.9));
        assert_eq!(best_time(&s), Some((Segment::Q3, 89.9)));
    }
    #[test]
    fn test_best_time_only_q1() {
        let s = segs("SAR", Some(91.2), None, None);
        assert_eq!(best_time(&s), Some((Segment::Q1, 91.2)));
    }
    #[test]
    fn test_best_time_q2() {
        let s = segs("ALB", Some(90.4), Some(90.1), None);
        assert_eq!(s.best_time(), Some((Segment::Q2, 90.1)));
    }
    #[test]
    fn test_best_time_missing() {
        let s = segs("DNS", None, None, None);
        assert_eq!(best_time(&s), None);
    }

    #[test]
    fn test_qualifying_gaps() {
        let results = vec![
            segs("LEC", Some(90.0), Some(89.6), Some(89.4)),
            segs("VER", Some(89.9), Some(89.5), Some(89.2)),
            segs("HUL", Some(90.5), Some(90.2), None),
            segs("SAR", Some(91.0), None, None),
            segs("DNS", None, None, None),
        ];

        let gaps = qualifying_gaps(&results).unwrap();

        assert_abs_diff_eq!(gaps.pole_time, 89.2);
        let order: Vec<&str> = gaps.entries.iter().map(|e| e.driver.as_str()).collect();
        assert_eq!(order, vec!["VER", "LEC", "HUL", "SAR"]);
        assert_abs_diff_eq!(gaps.entries[1].delta, 0.2, epsilon = 1e-9);
        assert_abs_diff_eq!(gaps.entries[3].delta, 1.8, epsilon = 1e-9);
        assert_eq!(gaps.missing, vec!["DNS".to_owned()]);
        assert!(gaps.anomalies.is_empty());
    }
    #[test]
    fn test_qualifying_gaps_negative_delta_is_surfaced() {
        let results = vec![
            segs("VER", Some(89.9), Some(89.5), Some(89.2)),
            segs("BAD", Some(88.0), None, None),
        ];

        let gaps = qualifying_gaps(&results).unwrap();

        assert_eq!(gaps.entries[0].driver, "BAD");
        assert_abs_diff_eq!(gaps.entries[0].delta, -1.2, epsilon = 1e-9);
        assert_eq!(gaps.anomalies, vec!["BAD".to_owned()]);
    }
    #[test]
    fn test_qualifying_color_label_falls_back_to_driver() {
        let mut ver = segs("VER", None, None, Some(89.2));
        ver.team = "Red Bull Racing".to_owned();
        let results = vec![
            ver,
            segs("SAR", Some(91.0), None, None),
            segs("HUL", Some(90.5), None, None),
        ];

        let gaps = qualifying_gaps(&results).unwrap();

        let labels: Vec<&str> = gaps.entries.iter().map(|e| e.color_label()).collect();
        assert_eq!(labels, vec!["Red Bull Racing", "HUL", "SAR"]);
    }
    #[test]
    fn test_qualifying_gaps_without_q3() {
        let results = vec![segs("SAR", Some(91.0), None, None)];
        assert!(matches!(
            qualifying_gaps(&results),
            Err(AnalysisError::MissingData(_))
        ));
    }
}


#[cfg(test)]
mod smoothing_tests {
    use crate::core::smoothing::savgol;
    use approx::assert_abs_diff_eq;
    use helpers::general::AnalysisError;

    #[test]
    fn test_savgol_constant() {
        let series = vec![2.5; 12];
        let smoothed = savgol(&series, 5, 2).unwrap();
        for v in smoothed.iter() {
            assert_abs_diff_eq!(*v, 2.5, epsilon = 1e-9);
        }
    }
    #[test]
    fn test_savgol_reproduces_quadratic() {
        let series: Vec<f64> = (0..15)
            .map(|i| {
                let t = i as f64;
                0.5 * t * t - 2.0 * t + 3.0
            })
            .collect();

        let smoothed = savgol(&series, 7, 2).unwrap();

        assert_eq!(smoothed.len(), series.len());
        for (s, v) in smoothed.iter().zip(series.iter()) {
            assert_abs_diff_eq!(*s, *v, epsilon = 1e-9);
        }
    }
    #[test]
    fn test_savgol_highest_order_returns_input() {
        let series: Vec<f64> = (0..50).map(|i| (i as f64 * 0.3).sin()).collect();

        let smoothed = savgol(&series, 21, 20).unwrap();

        assert_eq!(smoothed.len(), series.len());
        for (s, v) in smoothed.iter().zip(series.iter()) {
            assert_abs_diff_eq!(*s, *v, epsilon = 1e-9);
        }
    }
    #[test]
    fn test_savgol_high_order_reproduces_cubic() {
        let series: Vec<f64> = (0..40)
            .map(|i| {
                let t = i as f64 / 10.0;
                t * t * t - 2.0 * t + 1.0
            })
            .collect();

        let smoothed = savgol(&series, 25, 12).unwrap();

        for (s, v) in smoothed.iter().zip(series.iter()) {
            assert_abs_diff_eq!(*s, *v, epsilon = 1e-7);
        }
    }
    #[test]
    fn test_savgol_moving_average_for_order_zero() {
        let series = vec![0.0, 0.0, 5.0, 0.0, 0.0, 0.0];
        let smoothed = savgol(&series, 5, 0).unwrap();
        assert_abs_diff_eq!(smoothed[2], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(smoothed[3], 1.0, epsilon = 1e-12);
    }
    #[test]
    fn test_savgol_invalid_window() {
        let series = vec![0.0; 10];
        assert!(matches!(
            savgol(&series, 4, 2),
            Err(AnalysisError::InvalidInput(_))
        ));
        assert!(matches!(
            savgol(&series, 3, 1),
            Err(AnalysisError::InvalidInput(_))
        ));
        assert!(matches!(
            savgol(&series, 5, 5),
            Err(AnalysisError::InvalidInput(_))
        ));
    }
    #[test]
    fn test_savgol_insufficient_data() {
        let series = vec![0.0; 6];
        assert!(matches!(
            savgol(&series, 7, 2),
            Err(AnalysisError::InsufficientData(_))
        ));
    }
}


#[cfg(test)]
mod colors_tests {
    use crate::core::colors::{ColorAssigner, LabelStyle, StyleTable};
    use crate::interfaces::render_interface::DashStyle;
    use helpers::general::AnalysisError;
    use proptest::prelude::*;
    use std::collections::{HashMap, HashSet};

    fn palette(colors: &[&str]) -> Vec<String> {
        colors.iter().map(|c| (*c).to_owned()).collect()
    }

    #[test]
    fn test_assign_uses_preferred_colors() {
        let assigner = ColorAssigner::new(palette(&["#111111", "#222222"]));
        let assignment = assigner
            .assign(&["VER", "HAM"], |label| match label {
                "VER" => Some("#3671c6".to_owned()),
                "HAM" => Some("#27f4d2".to_owned()),
                _ => None,
            })
            .unwrap();

        assert_eq!(assignment.get("VER"), Some("#3671c6"));
        assert_eq!(assignment.get("HAM"), Some("#27f4d2"));
        assert!(assignment.entries.iter().all(|e| !e.from_fallback));
    }
    #[test]
    fn test_assign_falls_back_on_duplicate_missing_and_sentinel() {
        let assigner =
            ColorAssigner::new(palette(&["#111111", "#222222", "#333333"])).with_sentinel("gray");
        let assignment = assigner
            .assign(&["VER", "PER", "DOO", "NEW"], |label| match label {
                "VER" => Some("red".to_owned()),
                "PER" => Some("#ff0000".to_owned()),
                "NEW" => Some("#808080".to_owned()),
                _ => None,
            })
            .unwrap();

        assert_eq!(assignment.get("VER"), Some("red"));
        assert_eq!(assignment.get("PER"), Some("#111111"));
        assert_eq!(assignment.get("DOO"), Some("#222222"));
        assert_eq!(assignment.get("NEW"), Some("#333333"));
    }
    #[test]
    fn test_assign_skips_palette_colors_in_use() {
        let assigner = ColorAssigner::new(palette(&["#111111", "#222222"]));
        let assignment = assigner
            .assign(&["A", "B"], |label| match label {
                "A" => Some("#111111".to_owned()),
                _ => None,
            })
            .unwrap();

        assert_eq!(assignment.get("B"), Some("#222222"));
    }
    #[test]
    fn test_assign_palette_exhausted() {
        let assigner = ColorAssigner::new(palette(&["#111111", "#222222"]));
        assert!(matches!(
            assigner.assign(&["A", "B", "C"], |_| None),
            Err(AnalysisError::PaletteExhausted(_))
        ));
    }
    #[test]
    fn test_assign_duplicate_labels_once() {
        let assigner = ColorAssigner::default();
        let assignment = assigner.assign(&["A", "A", "B"], |_| None).unwrap();
        assert_eq!(assignment.len(), 2);
    }
    #[test]
    fn test_assign_invalid_color() {
        let assigner = ColorAssigner::default();
        assert!(matches!(
            assigner.assign(&["A"], |_| Some("not-a-color".to_owned())),
            Err(AnalysisError::InvalidInput(_))
        ));
    }
    #[test]
    fn test_style_table() {
        let mut labels = HashMap::new();
        labels.insert(
            "HAM".to_owned(),
            LabelStyle {
                color: Some("#27f4d2".to_owned()),
                dash: DashStyle::Dash,
            },
        );
        let mut seasons = HashMap::new();
        seasons.insert(2024, labels);
        let table = StyleTable { seasons };

        assert_eq!(table.preferred_color(2024, "HAM"), Some("#27f4d2".to_owned()));
        assert_eq!(table.preferred_color(2023, "HAM"), None);
        assert_eq!(table.dash_style(2024, "HAM"), DashStyle::Dash);
        assert_eq!(table.dash_style(2024, "VER"), DashStyle::Solid);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_assign_colors_are_distinct(
            preferred in proptest::collection::vec(proptest::option::of(0usize..4), 1..=20),
        ) {
            let preferred_colors = ["#ff0000", "red", "#00ff00", "#636efa"];
            let labels: Vec<String> = (0..preferred.len()).map(|i| format!("D{}", i)).collect();

            let assignment = ColorAssigner::default()
                .assign(&labels, |label| {
                    let idx: usize = label[1..].parse().ok()?;
                    preferred[idx].map(|c| preferred_colors[c].to_owned())
                })
                .unwrap();

            prop_assert_eq!(assignment.len(), labels.len());
            let distinct: HashSet<_> = assignment.entries.iter().map(|e| e.rgb).collect();
            prop_assert_eq!(distinct.len(), labels.len());
        }
    }
}

#[cfg(test)]
mod laps_tests {
    use crate::core::laps::{
        lap_time_comparison, lap_time_series, position_evolution, Compound, LapRecord,
    };
    use crate::core::tyres::tyre_degradation;
    use approx::assert_abs_diff_eq;
    use helpers::general::AnalysisError;

    fn lap(driver: &str, lap_number: u32, lap_time: Option<f64>, position: Option<u32>) -> LapRecord {
        LapRecord {
            driver: driver.to_owned(),
            team: String::new(),
            lap_number,
            lap_time,
            compound: Compound::Medium,
            position,
            quick_lap: true,
            stint: Some(1),
            tyre_life: Some(lap_number),
        }
    }

    #[test]
    fn test_position_evolution() {
        let laps = vec![
            lap("VER", 2, Some(95.0), Some(1)),
            lap("LEC", 1, Some(96.0), Some(1)),
            lap("VER", 1, Some(96.5), Some(2)),
            lap("LEC", 2, Some(95.5), Some(2)),
            lap("LEC", 3, None, None),
            lap("OUT", 1, None, None),
        ];

        let series = position_evolution(&laps);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].driver, "VER");
        assert_eq!(series[0].lap_numbers, vec![1, 2]);
        assert_eq!(series[0].positions, vec![2, 1]);
        assert_eq!(series[1].lap_numbers, vec![1, 2]);
    }
    #[test]
    fn test_lap_time_series_fastest_lap() {
        let laps = vec![
            lap("HAM", 3, Some(94.2), Some(3)),
            lap("HAM", 1, Some(99.0), Some(3)),
            lap("HAM", 2, Some(94.2), Some(3)),
            lap("HAM", 4, None, Some(3)),
        ];

        let series = lap_time_series(&laps, "HAM", false).unwrap();

        assert_eq!(series.lap_numbers, vec![1, 2, 3]);
        assert_eq!(series.fastest.lap_number, 2);
        assert_abs_diff_eq!(series.fastest.lap_time, 94.2);
    }
    #[test]
    fn test_lap_time_series_quick_only() {
        let mut out_lap = lap("HAM", 1, Some(80.0), Some(3));
        out_lap.quick_lap = false;
        let laps = vec![out_lap, lap("HAM", 2, Some(94.0), Some(3))];

        let series = lap_time_series(&laps, "HAM", true).unwrap();

        assert_eq!(series.lap_numbers, vec![2]);
    }
    #[test]
    fn test_lap_time_series_missing_driver() {
        let laps = vec![lap("HAM", 1, Some(94.0), Some(3))];
        assert!(matches!(
            lap_time_series(&laps, "VER", false),
            Err(AnalysisError::MissingData(_))
        ));
        assert!(lap_time_comparison(&laps, &["HAM".to_owned(), "VER".to_owned()], false).is_err());
    }

    #[test]
    fn test_tyre_degradation() {
        let mut laps: Vec<LapRecord> = (1..=5)
            .map(|i| lap("HAM", i, Some(90.0 + 0.1 * i as f64), Some(1)))
            .collect();
        let mut soft = lap("HAM", 6, Some(89.0), Some(1));
        soft.compound = Compound::Soft;
        laps.push(soft);
        let mut slow = lap("HAM", 7, Some(120.0), Some(1));
        slow.quick_lap = false;
        laps.push(slow);

        let distr = tyre_degradation(&laps);

        assert_eq!(distr.len(), 2);
        assert_eq!(distr[0].compound, Compound::Soft);
        assert_eq!(distr[0].degr_rate, None);
        assert_eq!(distr[1].compound, Compound::Medium);
        assert_eq!(distr[1].count, 5);
        assert_abs_diff_eq!(distr[1].median, 90.3, epsilon = 1e-9);
        assert_abs_diff_eq!(distr[1].degr_rate.unwrap(), 0.1, epsilon = 1e-9);
    }
}

#[cfg(test)]
mod track_map_tests {
    use crate::core::telemetry::TelemetrySample;
    use crate::core::track_map::{minisector_overlay, TrackMap};
    use approx::assert_abs_diff_eq;
    use helpers::general::AnalysisError;

    fn sample(distance: f64, time: f64, x: f64, y: f64) -> TelemetrySample {
        TelemetrySample { distance, time, x, y }
    }

    #[test]
    fn test_track_map_rotation() {
        let samples = vec![sample(0.0, 0.0, 0.0, 0.0), sample(10.0, 1.0, 10.0, 0.0)];

        let map = TrackMap::from_samples(&samples, 90.0);

        assert_abs_diff_eq!(map.points[1].x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(map.points[1].y, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(map.length(), 10.0, epsilon = 1e-9);
    }
    #[test]
    fn test_track_map_axes_expansion_is_square() {
        let samples = vec![sample(0.0, 0.0, 0.0, 0.0), sample(10.0, 1.0, 20.0, 10.0)];

        let [x_min, x_max, y_min, y_max] = TrackMap::from_samples(&samples, 0.0)
            .axes_expansion(5.0)
            .unwrap();

        assert_abs_diff_eq!(x_max - x_min, y_max - y_min);
        assert_abs_diff_eq!(x_min, -5.0);
        assert_abs_diff_eq!(y_min, -10.0);
    }
    #[test]
    fn test_minisector_overlay() {
        // VER is faster in the first half, HAM in the second half
        let ver = vec![sample(0.0, 0.0, 0.0, 0.0), sample(50.0, 4.0, 0.0, 0.0), sample(100.0, 10.0, 0.0, 0.0)];
        let ham = vec![sample(0.0, 0.0, 0.0, 0.0), sample(50.0, 5.0, 0.0, 0.0), sample(100.0, 10.5, 0.0, 0.0)];
        let ham_drift: Vec<TelemetrySample> = ham
            .iter()
            .map(|s| sample(s.distance * 1.02, s.time, s.x, s.y))
            .collect();

        let minisectors = minisector_overlay(
            &[("VER".to_owned(), ver), ("HAM".to_owned(), ham_drift)],
            2,
        )
        .unwrap();

        assert_eq!(minisectors.len(), 2);
        assert_eq!(minisectors[0].driver, "VER");
        assert_abs_diff_eq!(minisectors[0].time, 4.0, epsilon = 1e-9);
        assert_eq!(minisectors[1].driver, "HAM");
        assert_abs_diff_eq!(minisectors[1].time, 5.5, epsilon = 1e-9);
        assert_abs_diff_eq!(minisectors[1].start, 50.0, epsilon = 1e-9);
    }
    #[test]
    fn test_minisector_overlay_invalid() {
        assert!(matches!(
            minisector_overlay(&[], 5),
            Err(AnalysisError::InvalidInput(_))
        ));
        let trace = vec![sample(0.0, 0.0, 0.0, 0.0), sample(10.0, 1.0, 0.0, 0.0)];
        assert!(matches!(
            minisector_overlay(&[("VER".to_owned(), trace)], 0),
            Err(AnalysisError::InvalidInput(_))
        ));
    }
}
