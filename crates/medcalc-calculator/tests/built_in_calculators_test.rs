use medcalc_calculator::built_in::{PonderalIndexFormula, RevisedBmiFormula, StandardBmiFormula};
use medcalc_calculator::guidelines::BMI_RULE;
use medcalc_calculator::{
    BmiInput, BmiOutput, GuidelineKind, asian_calculator, calculate_bmi, calculator_for,
    who_calculator,
};
use medcalc_core::{
    Calculator, Formula, FormulaParams, Guideline, MedCalcError, Observation, OutputModel,
    RangeRule, Region, UnitDefaults,
};
use std::sync::Arc;

fn metric(weight_kg: f64, height_m: f64) -> BmiInput {
    BmiInput::new(Observation::new(weight_kg, "kg"), Observation::new(height_m, "m"))
}

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

#[test]
fn standard_bmi_with_who_thresholds() {
    let out = who_calculator().unwrap().calculate(&metric(70.0, 1.75)).unwrap();
    assert_close(out.bmi, 22.86, 0.01);
    assert_eq!(out.category, "Normal weight");
    assert_eq!(out.unit, "kg/m^2");
}

#[test]
fn normal_weight_under_both_guidelines() {
    let input = metric(65.0, 1.70);
    let who = who_calculator().unwrap().calculate(&input).unwrap();
    let asian = asian_calculator().unwrap().calculate(&input).unwrap();
    assert_close(who.bmi, 22.49, 0.01);
    assert_eq!(who.category, "Normal weight");
    assert_eq!(asian.category, "Normal weight");
}

#[test]
fn guidelines_disagree_between_23_and_25() {
    let input = metric(70.0, 1.70);
    let who = who_calculator().unwrap().calculate(&input).unwrap();
    let asian = asian_calculator().unwrap().calculate(&input).unwrap();
    assert_close(who.bmi, 24.22, 0.01);
    assert_eq!(who.category, "Normal weight");
    assert_eq!(asian.category, "Overweight");
}

#[test]
fn extremes_are_underweight_and_obese() {
    let calc = who_calculator().unwrap();
    assert_eq!(calc.calculate(&metric(35.0, 1.75)).unwrap().category, "Underweight");
    assert_eq!(calc.calculate(&metric(150.0, 1.75)).unwrap().category, "Obese");
}

#[test]
fn zero_height_is_invalid_input() {
    let err = who_calculator().unwrap().calculate(&metric(70.0, 0.0)).unwrap_err();
    assert!(matches!(err, MedCalcError::InvalidInput { field: Some(ref f), .. } if f == "height_m"));
    assert!(err.is_input_error());

    let params = FormulaParams::new().with("weight_kg", 70.0).with("height_m", 0.0);
    assert!(StandardBmiFormula::new().calculate(&params).is_err());
}

#[test]
fn imperial_units_are_converted() {
    let us = UnitDefaults::for_region(Region::Us);
    let out = who_calculator().unwrap().calculate(&BmiInput::from_raw(154.0, 68.0, &us)).unwrap();
    assert_close(out.bmi, 23.4, 0.05);

    let mixed = BmiInput::new(Observation::new(70.0, "kg"), Observation::new(69.0, "in"));
    let out = who_calculator().unwrap().calculate(&mixed).unwrap();
    assert_close(out.bmi, 22.79, 0.01);
}

#[test]
fn json_payload_end_to_end() {
    let input = BmiInput::from_json(
        r#"{"weight": {"value": 11, "unit": "stone"}, "height": {"value": 175, "unit": "cm"}}"#,
        &UnitDefaults::default(),
    )
    .unwrap();
    let out = who_calculator().unwrap().calculate(&input).unwrap();
    assert_close(out.bmi, 22.81, 0.01);
    assert_eq!(out.category, "Normal weight");
}

#[test]
fn output_unit_conversion() {
    let out = calculate_bmi(&metric(70.0, 1.75), "who", "standard", Some("lb/ft^2")).unwrap();
    assert_close(out.bmi, 4.68, 0.01);
    assert_eq!(out.category, "Normal weight");
    assert_eq!(out.summary(), "BMI: 4.7 lb/ft^2 (Normal weight)");
}

#[test]
fn alternative_formulas() {
    let ponderal = calculator_for(GuidelineKind::Who, PonderalIndexFormula::NAME)
        .unwrap()
        .calculate(&metric(70.0, 1.75))
        .unwrap();
    assert_close(ponderal.bmi, 13.06, 0.01);

    let revised = calculator_for(GuidelineKind::Who, RevisedBmiFormula::NAME)
        .unwrap()
        .calculate(&metric(70.0, 1.75))
        .unwrap();
    assert_close(revised.bmi, 22.46, 0.01);
    assert_eq!(revised.category, "Normal weight");
}

#[test]
fn unknown_guideline_is_not_found() {
    let err = calculate_bmi(&metric(70.0, 1.75), "nhs", "standard", None).unwrap_err();
    assert_eq!(err, MedCalcError::not_found("guideline", "nhs"));
    assert_eq!(err.to_string(), "guideline 'nhs' not found");
}

#[test]
fn missing_unit_fails_validation() {
    let input = BmiInput::new(Observation::unitless(70.0), Observation::new(1.75, "m"));
    let err = who_calculator().unwrap().calculate(&input).unwrap_err();
    assert_eq!(err, MedCalcError::validation("weight", "Weight must have a unit"));
}

#[test]
fn custom_guideline_reuses_built_in_formulas() {
    let guideline = Guideline::new("Strict")
        .with_rule(
            RangeRule::new(BMI_RULE, [("Fine", (0.0, 22.0)), ("Watch", (22.0, f64::INFINITY))])
                .unwrap(),
        )
        .and_then(|g| g.with_formula(StandardBmiFormula::new()))
        .unwrap();
    let calc: Calculator<BmiInput, BmiOutput> = Calculator::new(Arc::new(guideline));
    assert_eq!(calc.calculate(&metric(70.0, 1.75)).unwrap().category, "Watch");
}
