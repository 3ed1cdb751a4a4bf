#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{WireRecord, is_valid_record, parse_oracle_payload};

    fn record(a: &str, b: &str) -> serde_json::Value {
        json!({
            "attacker": {
                "name": "Great Tusk",
                "item": "Booster Energy",
                "ability": "Protosynthesis",
                "stats": { "hp": 374, "atk": 309, "def": 296, "spa": 127, "spd": 143, "spe": 300 }
            },
            "defender": {
                "name": "Kingambit",
                "item": "Leftovers",
                "ability": "Supreme Overlord",
                "stats": { "hp": 404, "atk": 306, "def": 276, "spa": 140, "spd": 206, "spe": 136 }
            },
            "moves": [
                { "name": "Headlong Rush", "min": 180, "max": 213 },
                { "name": "Rapid Spin", "error": "invalid move" }
            ],
            "setNames": { "a": a, "b": b }
        })
    }

    #[test]
    fn test_valid_record() {
        let raw = record("strategy: Booster Energy", "strategy: Swords Dance");
        assert!(is_valid_record(&raw));
    }

    #[test]
    fn test_reserved_prefixes_rejected() {
        assert!(!is_valid_record(&record("typefire", "name:generic")));
        assert!(!is_valid_record(&record("strategy: Bulk", "name:generic")));
        assert!(!is_valid_record(&record("typefire", "strategy: Bulk")));
        assert!(!is_valid_record(&record("ability1", "strategy: Bulk")));
        assert!(!is_valid_record(&record("strategy: Bulk", "hidden ability")));
        assert!(!is_valid_record(&record("format", "strategy: Bulk")));
    }

    #[test]
    fn test_malformed_records_rejected() {
        assert!(!is_valid_record(&json!(null)));
        assert!(!is_valid_record(&json!([1, 2, 3])));
        assert!(!is_valid_record(&json!({ "attacker": "Great Tusk" })));

        let mut missing_moves = record("strategy: A", "strategy: B");
        missing_moves.as_object_mut().unwrap().remove("moves");
        assert!(!is_valid_record(&missing_moves));

        let mut unnamed = record("strategy: A", "strategy: B");
        unnamed["defender"].as_object_mut().unwrap().remove("name");
        assert!(!is_valid_record(&unnamed));

        let mut half_ids = record("strategy: A", "strategy: B");
        half_ids["setNames"].as_object_mut().unwrap().remove("b");
        assert!(!is_valid_record(&half_ids));

        let mut numeric_id = record("strategy: A", "strategy: B");
        numeric_id["setNames"]["a"] = json!(7);
        assert!(!is_valid_record(&numeric_id));
    }

    #[test]
    fn test_decode_record() {
        let raw = record("strategy: Booster Energy", "strategy: Swords Dance");
        let decoded = WireRecord::from_raw(&raw).unwrap();

        assert_eq!(decoded.attacker.name, "Great Tusk");
        assert_eq!(decoded.attacker.stats.hp, 374.0);
        assert_eq!(decoded.defender.stats.spe, 136.0);
        assert_eq!(decoded.moves.len(), 2);
        assert_eq!(decoded.moves[0].max, Some(213.0));
        assert_eq!(decoded.moves[1].max, None);
        assert!(decoded.moves[1].error.is_some());
        assert_eq!(decoded.set_names.b, "strategy: Swords Dance");
    }

    #[test]
    fn test_parse_payload() {
        let payload = format!("[{}]\n", record("strategy: A", "strategy: B"));
        let records = parse_oracle_payload(&payload).unwrap();
        assert_eq!(records.len(), 1);

        assert!(parse_oracle_payload("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_payload_invalid() {
        assert!(parse_oracle_payload("").is_err());
        assert!(parse_oracle_payload("   \n").is_err());
        assert!(parse_oracle_payload("Pokemon not found: missingno").is_err());
        assert!(parse_oracle_payload("{\"attacker\": {}}").is_err());
    }
}
