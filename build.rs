use std::path::Path;

fn main() {
    let catalog_path = Path::new("catalogs/symptom_catalog.json");
    validate_catalog_file(catalog_path);
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    // Ensure catalog exists at build time
    assert!(
        catalog_path.exists(),
        "\n\nCATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the catalog file before building.\n",
        catalog_path.display()
    );

    let catalog_contents = std::fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            catalog_path.display()
        );
    });

    let catalog: serde_json::Value = serde_json::from_str(&catalog_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            catalog_path.display()
        );
    });

    validate_catalog_structure(&catalog);
}

fn validate_catalog_structure(catalog: &serde_json::Value) {
    assert!(
        catalog.is_object(),
        "\n\nCATALOG BUILD ERROR: Root must be a JSON object\n\
         Got: {catalog}\n"
    );

    let symptoms = required_array(catalog, "symptoms");
    let conditions = required_array(catalog, "conditions");

    for (i, symptom) in symptoms.iter().enumerate() {
        validate_symptom_fields(symptom, i);
    }
    for (i, condition) in conditions.iter().enumerate() {
        validate_condition_fields(condition, i);
    }

    println!(
        "cargo:warning=Validated catalog: {} symptoms, {} conditions",
        symptoms.len(),
        conditions.len()
    );
}

fn required_array<'a>(catalog: &'a serde_json::Value, field: &str) -> &'a Vec<serde_json::Value> {
    let value = catalog.get(field).unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Missing '{field}' field\n\
             The catalog must have a top-level '{field}' array.\n"
        );
    });

    value.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: '{field}' must be an array\n\
             Got: {value}\n"
        );
    })
}

fn validate_symptom_fields(symptom: &serde_json::Value, index: usize) {
    let name = symptom
        .get("name")
        .and_then(|v| v.as_str())
        .unwrap_or("<unknown>");

    for field in ["id", "name", "prime", "category"] {
        assert!(
            symptom.get(field).is_some(),
            "\n\nCATALOG BUILD ERROR: Symptom '{name}' (index {index}) missing '{field}' field\n"
        );
    }

    // Full primality is checked at load time; reject the obvious mistakes here
    if let Some(prime) = symptom.get("prime").and_then(serde_json::Value::as_u64) {
        assert!(
            prime > 1,
            "\n\nCATALOG BUILD ERROR: Symptom '{name}' has prime {prime}\n\
             Symptom primes must be greater than 1.\n"
        );
    }
}

fn validate_condition_fields(condition: &serde_json::Value, index: usize) {
    let name = condition
        .get("name")
        .and_then(|v| v.as_str())
        .unwrap_or("<unknown>");

    for field in ["name", "category", "trigger_symptoms", "action"] {
        assert!(
            condition.get(field).is_some(),
            "\n\nCATALOG BUILD ERROR: Condition '{name}' (index {index}) missing '{field}' field\n"
        );
    }

    let triggers = condition
        .get("trigger_symptoms")
        .and_then(|t| t.as_array())
        .map_or(0, Vec::len);
    assert!(
        triggers > 0,
        "\n\nCATALOG BUILD ERROR: Condition '{name}' has no trigger symptoms\n"
    );
}

fn set_build_dependencies() {
    // Tell cargo to rerun if catalog changes
    println!("cargo:rerun-if-changed=catalogs/symptom_catalog.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
