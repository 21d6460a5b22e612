//! Property tests over the parameter panels, the temperature sweep and the
//! seasonality axis.

use proptest::prelude::*;
use tegdash_core::api::SeasonalityPoint;
use tegdash_core::chart::families::seasonality_floor;
use tegdash_core::page::{ids, Page};
use tegdash_core::panel::ControlKind;
use tegdash_core::params::ModulePreset;
use tegdash_core::sweep::temperature_sweep;
use tegdash_core::view::{Dashboard, ViewState};

const SLIDERS: [&str; 12] = [
    ids::IN_AREA,
    ids::IN_THICKNESS,
    ids::IN_THERMAL_RESISTANCE,
    ids::IN_EMISSIVITY,
    ids::IN_HOT_TEMP,
    ids::IN_COLD_TEMP,
    ids::IN_LOAD,
    ids::IN_HOURS,
    ids::IN_LOAD_REAL,
    ids::IN_HOURS_REAL,
    ids::IN_BATTERY,
    ids::IN_CONSUMPTION,
];

fn season(min: Option<f64>) -> SeasonalityPoint {
    SeasonalityPoint {
        month: "m".into(),
        min,
        q1: min,
        median: min,
        q3: min,
        max: min,
    }
}

fn edit_strategy() -> impl Strategy<Value = Vec<(usize, i32)>> {
    prop::collection::vec((0..SLIDERS.len(), -20i32..20), 1..40)
}

proptest! {
    /// After any sequence of edits, every label shows its control's value at
    /// the control's precision, and every value stays inside its range.
    #[test]
    fn labels_track_values(edits in edit_strategy(), custom in any::<bool>()) {
        let mut dash = Dashboard::new(Page::standard()).unwrap();
        dash.startup(ViewState::Theoretical).unwrap();
        if custom {
            dash.select_module(ModulePreset::Custom).unwrap();
        }
        for (index, steps) in edits {
            dash.nudge(SLIDERS[index], steps).unwrap();
        }
        for view in ViewState::ALL {
            for control in dash.panel(view).controls() {
                let Some((label_id, format)) = control.spec.label else { continue };
                let ControlKind::Slider { min, max, .. } = control.spec.kind else { continue };
                let value = dash.panel(view).number(control.spec.id).unwrap();
                prop_assert!(value >= min && value <= max);
                let expected = format.format(value);
                prop_assert_eq!(dash.page().label(label_id), Some(expected.as_str()));
            }
        }
    }

    /// Locked presets keep their geometry no matter what the user does.
    #[test]
    fn locked_geometry_survives_edits(edits in edit_strategy()) {
        let mut dash = Dashboard::new(Page::standard()).unwrap();
        dash.startup(ViewState::Theoretical).unwrap();
        for (index, steps) in edits {
            dash.nudge(SLIDERS[index], steps).unwrap();
        }
        let panel = &dash.theoretical().panel;
        prop_assert_eq!(panel.number(ids::IN_AREA).unwrap(), 16.0);
        prop_assert_eq!(panel.number(ids::IN_THICKNESS).unwrap(), 3.8);
    }

    /// The sweep needs no service and is determined by geometry alone.
    #[test]
    fn sweep_is_pure(area in 0.5f64..50.0, thickness in 1.0f64..10.0) {
        let a = temperature_sweep(area, thickness);
        let b = temperature_sweep(area, thickness);
        prop_assert_eq!(a.len(), 9);
        prop_assert_eq!(a, b);
    }

    /// The axis floor is `floor(0.95 × min)` over months with data; months
    /// without data never pull it down.
    #[test]
    fn seasonality_floor_tracks_smallest_minimum(
        mins in prop::collection::vec(prop::option::of(0.0f64..500.0), 1..12),
        present in 0.0f64..500.0,
    ) {
        let mut points: Vec<SeasonalityPoint> = mins.iter().copied().map(season).collect();
        points.push(season(Some(present)));
        let smallest = mins.iter().flatten().fold(present, |a, b| a.min(*b));
        prop_assert_eq!(seasonality_floor(&points), Some((0.95 * smallest).floor()));
    }
}
