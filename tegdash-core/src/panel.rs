//! Parameter panels: the controls of one tab and their value labels.
//!
//! A panel is built from a static table of [`ControlSpec`]s and bound to a
//! [`Page`]. Every edit that changes a value yields a [`Change`]; the owning
//! view turns changes into label updates and a refresh. Programmatic writes
//! (presets, restored state) synthesize the same notifications.

use crate::labels::LabelFormat;
use crate::page::{Page, PageError};

/// What kind of input a control is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlKind {
    /// Numeric range input.
    Slider { min: f64, max: f64, step: f64, default: f64 },
    /// Select over fixed wire values; `default` is an option index.
    Select { options: &'static [&'static str], default: usize },
}

/// Static description of a control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSpec {
    /// Input element id.
    pub id: &'static str,
    /// Display name.
    pub title: &'static str,
    pub kind: ControlKind,
    /// Label element the value is mirrored into, with its format.
    pub label: Option<(&'static str, LabelFormat)>,
}

impl ControlSpec {
    pub const fn slider(
        id: &'static str,
        title: &'static str,
        (min, max, step): (f64, f64, f64),
        default: f64,
        label: (&'static str, LabelFormat),
    ) -> Self {
        Self {
            id,
            title,
            kind: ControlKind::Slider { min, max, step, default },
            label: Some(label),
        }
    }

    pub const fn select(
        id: &'static str,
        title: &'static str,
        options: &'static [&'static str],
        default_index: usize,
    ) -> Self {
        Self {
            id,
            title,
            kind: ControlKind::Select { options, default: default_index },
            label: None,
        }
    }
}

/// Current value of a control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlValue {
    Number(f64),
    Choice(usize),
}

/// A live control.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub spec: ControlSpec,
    pub value: ControlValue,
    pub disabled: bool,
}

impl Control {
    fn new(spec: ControlSpec) -> Self {
        let value = match spec.kind {
            ControlKind::Slider { default, .. } => ControlValue::Number(default),
            ControlKind::Select { default, .. } => ControlValue::Choice(default),
        };
        Self {
            spec,
            value,
            disabled: false,
        }
    }

    /// Value rendered for display: label text for sliders, the option for selects.
    pub fn display(&self) -> String {
        match (self.value, self.spec.kind) {
            (ControlValue::Number(v), _) => match self.spec.label {
                Some((_, format)) => format.format(v),
                None => crate::labels::raw_value(v),
            },
            (ControlValue::Choice(i), ControlKind::Select { options, .. }) => {
                options.get(i).copied().unwrap_or_default().to_string()
            }
            (ControlValue::Choice(i), _) => i.to_string(),
        }
    }

    /// Position of a slider within its range, 0..=1.
    pub fn fraction(&self) -> f64 {
        match (self.value, self.spec.kind) {
            (ControlValue::Number(v), ControlKind::Slider { min, max, .. }) if max > min => {
                ((v - min) / (max - min)).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }
}

/// Notification that a control's value was (re)written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    pub id: &'static str,
}

/// The controls of one tab.
#[derive(Debug, Clone)]
pub struct ParameterPanel {
    controls: Vec<Control>,
}

impl ParameterPanel {
    /// Build a panel from its control table, verifying every input exists on
    /// the page.
    pub fn bind(specs: &[ControlSpec], page: &Page) -> Result<Self, PageError> {
        for spec in specs {
            page.require_input(spec.id)?;
        }
        Ok(Self {
            controls: specs.iter().copied().map(Control::new).collect(),
        })
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn control(&self, id: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.spec.id == id)
    }

    fn control_mut(&mut self, id: &str) -> Result<&mut Control, PageError> {
        self.controls
            .iter_mut()
            .find(|c| c.spec.id == id)
            .ok_or_else(|| PageError::MissingElement(id.to_string()))
    }

    /// Numeric value of a slider.
    pub fn number(&self, id: &str) -> Result<f64, PageError> {
        match self.control(id).map(|c| c.value) {
            Some(ControlValue::Number(v)) => Ok(v),
            Some(ControlValue::Choice(_)) => Err(PageError::WrongKind {
                id: id.to_string(),
                expected: "slider",
                found: "select",
            }),
            None => Err(PageError::MissingElement(id.to_string())),
        }
    }

    /// Selected wire value of a select.
    pub fn choice(&self, id: &str) -> Result<&'static str, PageError> {
        let control = self
            .control(id)
            .ok_or_else(|| PageError::MissingElement(id.to_string()))?;
        match (control.value, control.spec.kind) {
            (ControlValue::Choice(i), ControlKind::Select { options, .. }) => options
                .get(i)
                .copied()
                .ok_or_else(|| PageError::MissingElement(format!("{id}[{i}]"))),
            _ => Err(PageError::WrongKind {
                id: id.to_string(),
                expected: "select",
                found: "slider",
            }),
        }
    }

    pub fn is_disabled(&self, id: &str) -> bool {
        self.control(id).is_some_and(|c| c.disabled)
    }

    pub fn set_disabled(&mut self, id: &str, disabled: bool) -> Result<(), PageError> {
        self.control_mut(id)?.disabled = disabled;
        Ok(())
    }

    /// User edit of a slider. Disabled controls reject the edit. The value is
    /// clamped to the range and snapped to the step grid.
    pub fn set_number(&mut self, id: &str, value: f64) -> Result<Option<Change>, PageError> {
        if self.is_disabled(id) {
            return Ok(None);
        }
        self.write_number(id, value)
    }

    /// Move a slider by `steps` increments.
    pub fn nudge(&mut self, id: &str, steps: i32) -> Result<Option<Change>, PageError> {
        let control = self.control_mut(id)?;
        match (control.value, control.spec.kind) {
            (ControlValue::Number(v), ControlKind::Slider { step, .. }) => {
                let target = v + step * f64::from(steps);
                self.set_number(id, target)
            }
            (ControlValue::Choice(_), _) => self.cycle_choice(id, steps),
            _ => Ok(None),
        }
    }

    /// Programmatic write that ignores the disabled flag.
    pub fn write_number(&mut self, id: &str, value: f64) -> Result<Option<Change>, PageError> {
        let control = self.control_mut(id)?;
        let ControlKind::Slider { min, max, step, .. } = control.spec.kind else {
            return Err(PageError::WrongKind {
                id: id.to_string(),
                expected: "slider",
                found: "select",
            });
        };
        let snapped = snap(value.clamp(min, max), step);
        if control.value == ControlValue::Number(snapped) {
            return Ok(None);
        }
        control.value = ControlValue::Number(snapped);
        Ok(Some(Change { id: control.spec.id }))
    }

    /// Select an option by wire value.
    pub fn select(&mut self, id: &str, option: &str) -> Result<Option<Change>, PageError> {
        let control = self.control_mut(id)?;
        let ControlKind::Select { options, .. } = control.spec.kind else {
            return Err(PageError::WrongKind {
                id: id.to_string(),
                expected: "select",
                found: "slider",
            });
        };
        let index = options
            .iter()
            .position(|o| *o == option)
            .ok_or_else(|| PageError::MissingElement(format!("{id}[{option}]")))?;
        if control.value == ControlValue::Choice(index) || control.disabled {
            return Ok(None);
        }
        control.value = ControlValue::Choice(index);
        Ok(Some(Change { id: control.spec.id }))
    }

    /// Step a select forwards or backwards, wrapping around.
    pub fn cycle_choice(&mut self, id: &str, direction: i32) -> Result<Option<Change>, PageError> {
        let control = self.control_mut(id)?;
        let (ControlValue::Choice(current), ControlKind::Select { options, .. }) =
            (control.value, control.spec.kind)
        else {
            return Ok(None);
        };
        if options.is_empty() || control.disabled {
            return Ok(None);
        }
        let len = options.len() as i32;
        let next = (current as i32 + direction).rem_euclid(len) as usize;
        let option = options[next];
        self.select(id, option)
    }

    /// A change notification for every control, as if each had been edited.
    pub fn touch_all(&self) -> Vec<Change> {
        self.controls.iter().map(|c| Change { id: c.spec.id }).collect()
    }

    /// Mirror the control behind `change` into its label.
    pub fn update_label(&self, page: &mut Page, change: Change) {
        if let Some(control) = self.control(change.id) {
            write_label(page, control);
        }
    }

    /// Mirror every control into its label.
    pub fn update_labels(&self, page: &mut Page) {
        for control in &self.controls {
            write_label(page, control);
        }
    }
}

fn write_label(page: &mut Page, control: &Control) {
    if let (Some((label_id, format)), ControlValue::Number(v)) = (control.spec.label, control.value) {
        page.set_label(label_id, format.format(v));
    }
}

/// Snap to the step grid and strip binary noise (`2.1`, not `2.1000000000000001`).
fn snap(value: f64, step: f64) -> f64 {
    if step <= 0.0 {
        return value;
    }
    let decimals = step_decimals(step);
    let scale = 10f64.powi(decimals);
    let stepped = (value / step).round() * step;
    (stepped * scale).round() / scale
}

fn step_decimals(step: f64) -> i32 {
    let mut decimals = 0;
    let mut s = step;
    while (s - s.round()).abs() > 1e-9 && decimals < 6 {
        s *= 10.0;
        decimals += 1;
    }
    decimals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::ids;

    const SPECS: [ControlSpec; 2] = [
        ControlSpec::slider(
            ids::IN_AREA,
            "Area",
            (0.5, 50.0, 0.5),
            16.0,
            (ids::VAL_AREA, LabelFormat::fixed(1, " cm²")),
        ),
        ControlSpec::select(ids::IN_SOURCE, "Source", &["fuego", "residuos", "industrial"], 0),
    ];

    fn panel() -> (ParameterPanel, Page) {
        let page = Page::standard();
        (ParameterPanel::bind(&SPECS, &page).unwrap(), page)
    }

    #[test]
    fn bind_fails_on_missing_input() {
        let mut page = Page::standard();
        page.remove(ids::IN_SOURCE);
        let err = ParameterPanel::bind(&SPECS, &page).unwrap_err();
        assert_eq!(err, PageError::MissingElement(ids::IN_SOURCE.into()));
    }

    #[test]
    fn set_number_clamps_snaps_and_notifies() {
        let (mut p, _) = panel();
        assert_eq!(
            p.set_number(ids::IN_AREA, 99.0).unwrap(),
            Some(Change { id: ids::IN_AREA })
        );
        assert_eq!(p.number(ids::IN_AREA).unwrap(), 50.0);
        p.set_number(ids::IN_AREA, 3.26).unwrap();
        assert_eq!(p.number(ids::IN_AREA).unwrap(), 3.5);
        // Same value again: no notification.
        assert_eq!(p.set_number(ids::IN_AREA, 3.5).unwrap(), None);
    }

    #[test]
    fn disabled_control_rejects_user_edits_but_not_writes() {
        let (mut p, _) = panel();
        p.set_disabled(ids::IN_AREA, true).unwrap();
        assert_eq!(p.set_number(ids::IN_AREA, 10.0).unwrap(), None);
        assert_eq!(p.number(ids::IN_AREA).unwrap(), 16.0);
        assert!(p.write_number(ids::IN_AREA, 1.0).unwrap().is_some());
        assert_eq!(p.number(ids::IN_AREA).unwrap(), 1.0);
    }

    #[test]
    fn nudge_accumulates_without_float_noise() {
        let (mut p, _) = panel();
        p.write_number(ids::IN_AREA, 0.5).unwrap();
        for _ in 0..3 {
            p.nudge(ids::IN_AREA, 1).unwrap();
        }
        assert_eq!(p.number(ids::IN_AREA).unwrap(), 2.0);
        assert_eq!(snap(2.0 + 0.1, 0.1), 2.1);
    }

    #[test]
    fn cycle_choice_wraps() {
        let (mut p, _) = panel();
        p.cycle_choice(ids::IN_SOURCE, -1).unwrap();
        assert_eq!(p.choice(ids::IN_SOURCE).unwrap(), "industrial");
        p.cycle_choice(ids::IN_SOURCE, 1).unwrap();
        assert_eq!(p.choice(ids::IN_SOURCE).unwrap(), "fuego");
    }

    #[test]
    fn labels_mirror_values() {
        let (mut p, mut page) = panel();
        p.update_labels(&mut page);
        assert_eq!(page.label(ids::VAL_AREA), Some("16.0 cm²"));
        let change = p.set_number(ids::IN_AREA, 20.0).unwrap().unwrap();
        p.update_label(&mut page, change);
        assert_eq!(page.label(ids::VAL_AREA), Some("20.0 cm²"));
    }

    #[test]
    fn wrong_kind_accessors_error() {
        let (p, _) = panel();
        assert!(matches!(p.number(ids::IN_SOURCE), Err(PageError::WrongKind { .. })));
        assert!(matches!(p.choice(ids::IN_AREA), Err(PageError::WrongKind { .. })));
    }
}
