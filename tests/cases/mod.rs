// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::env;

use anyhow::{bail, Result};
use plan_to_query::*;
use serde::{Deserialize, Serialize};
use test_generator::test_resources;

#[derive(Serialize, Deserialize, Debug)]
struct TestCase {
    note: String,
    // Kept as json so that operands use the PDP's externally tagged encoding.
    plan: serde_json::Value,
    #[serde(default)]
    mapping: Option<Mapping>,
    want_query: Option<serde_json::Value>,
    want_result: Option<String>,
    error: Option<String>,
    skip: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug)]
struct YamlTest {
    #[serde(default)]
    mapping: Mapping,
    cases: Vec<TestCase>,
}

fn display_values(computed: &serde_json::Value, expected: &serde_json::Value) -> Result<String> {
    Ok(format!(
        "\nleft  = {}\nright = {}\n",
        serde_json::to_string_pretty(computed)?,
        serde_json::to_string_pretty(expected)?
    ))
}

fn check_result(case: &TestCase, result: PlanQuery) -> Result<()> {
    match (&case.want_query, &case.want_result, result) {
        (Some(expected), _, PlanQuery::Conditional { query }) => {
            let computed = serde_json::Value::Object(query);
            if &computed != expected {
                bail!("query mismatch: {}", display_values(&computed, expected)?);
            }
            Ok(())
        }
        (None, Some(expected), result) => {
            let computed = serde_json::to_value(&result)?;
            if computed["kind"].as_str() != Some(expected.as_str()) {
                bail!("expected {expected}, got {computed}");
            }
            Ok(())
        }
        (_, _, result) => bail!("unexpected translation result {result:?}"),
    }
}

fn yaml_test_impl(file: &str) -> Result<()> {
    let yaml_str = std::fs::read_to_string(file)?;
    let test: YamlTest = serde_yaml::from_str(&yaml_str)?;

    println!("running {file}");

    for case in test.cases {
        print!("case {} ", case.note);
        if case.skip == Some(true) {
            println!("skipped");
            continue;
        }

        match (&case.want_query, &case.want_result, &case.error) {
            (Some(_), None, None) | (None, Some(_), None) | (None, None, Some(_)) => (),
            _ => panic!("exactly one of want_query, want_result or error must be specified"),
        }

        let mapping = case.mapping.as_ref().unwrap_or(&test.mapping);
        mapping.validate()?;

        let plan: PlanResourcesFilter = serde_json::from_value(case.plan.clone())?;
        match mapping.translator().translate(&plan) {
            Ok(result) => {
                if case.error.is_some() {
                    bail!("translation succeeded and did not produce any errors");
                }
                check_result(&case, result)?;
            }
            Err(actual) => match &case.error {
                Some(expected) if actual.kind_name() == expected => println!("{actual}"),
                Some(expected) => bail!("expected {expected} error, got `{actual}`"),
                None => return Err(actual.into()),
            },
        }

        println!("passed");
    }

    Ok(())
}

fn yaml_test(file: &str) -> Result<()> {
    match yaml_test_impl(file) {
        Ok(_) => Ok(()),
        Err(e) => {
            // If Err is returned, it doesn't always get printed by cargo test.
            // Therefore, panic with the error.
            panic!("{}", e);
        }
    }
}

#[test]
#[ignore = "intended for running a single yaml file"]
fn one_yaml() -> Result<()> {
    let _ = env_logger::try_init();

    let mut file = String::default();
    for a in env::args() {
        if a.ends_with(".yaml") {
            file = a;
        }
    }

    if file.is_empty() {
        bail!("missing <yaml-file>");
    }

    yaml_test(file.as_str())
}

#[test_resources("tests/cases/**/*.yaml")]
fn run(path: &str) {
    let _ = env_logger::try_init();
    yaml_test(path).unwrap()
}
