//! Record loading and saving tests

use probe_record_sdk::models::STANDARD_COMMENTS;
use probe_record_sdk::{
    FieldError, InMemoryRowStore, RecordEdits, RecordLoader, RecordSaver, SheetMapping,
};

fn seeded_store(mapping: &SheetMapping) -> InMemoryRowStore {
    let width = mapping.max_column() + 1;
    let mut header = vec![String::new(); width];
    header[mapping.account_id] = "cuenta_id".to_string();

    let mut row = vec![String::new(); width];
    row[mapping.account_id] = "77".to_string();
    row[mapping.account_name] = "Vinedos del Sur".to_string();
    row[mapping.field_id] = "301".to_string();
    row[mapping.field_name] = "Cuartel Norte".to_string();
    row[mapping.probe_name] = "Sonda 12".to_string();
    row[mapping.probe_id] = "9012".to_string();
    row[mapping.crop] = "Vid".to_string();
    row[mapping.variety] = "Carmenere".to_string();
    row[mapping.area_hectares] = "2,50".to_string();

    InMemoryRowStore::new(vec![header, row])
}

mod loader_tests {
    use super::*;

    #[tokio::test]
    async fn test_load_record_maps_cells_to_fields() {
        let mapping = SheetMapping::default();
        let loader = RecordLoader::new(seeded_store(&mapping));

        let record = loader.load_record(&mapping, 1).await.unwrap();
        assert_eq!(record.header.account_name, "Vinedos del Sur");
        assert_eq!(record.fields.crop, "Vid");
        assert_eq!(record.fields.area_hectares, "2,50");
    }

    #[tokio::test]
    async fn test_short_rows_load_with_blank_fields() {
        let mapping = SheetMapping::default();
        let loader = RecordLoader::new(InMemoryRowStore::new(vec![
            vec![String::new()],
            vec!["77".to_string(), "Vinedos del Sur".to_string()],
        ]));

        let record = loader.load_record(&mapping, 1).await.unwrap();
        assert_eq!(record.header.account_name, "Vinedos del Sur");
        assert_eq!(record.fields.crop, "");
    }

    #[tokio::test]
    async fn test_summaries_skip_header_rows() {
        let mapping = SheetMapping::default();
        let loader = RecordLoader::new(seeded_store(&mapping));

        let summaries = loader.load_summaries(&mapping).await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].row_index, 1);
        assert_eq!(summaries[0].probe_name, "Sonda 12");
    }
}

mod saver_tests {
    use super::*;

    #[tokio::test]
    async fn test_full_submission_writes_derived_cells() {
        let mapping = SheetMapping::default();
        let saver = RecordSaver::new(seeded_store(&mapping));
        let edits = RecordEdits {
            location: Some("33°10'16.8\"S 70°45'1.2\"W".to_string()),
            area_hectares: Some("2,5".to_string()),
            plant_count: Some("10000".to_string()),
            emitter_count: Some("5001".to_string()),
            ..RecordEdits::default()
        };

        let report = saver.save(&mapping, 1, &edits).await.unwrap();
        assert!(report.warnings.is_empty());

        let row = &saver.store().snapshot()[1];
        assert_eq!(row[mapping.latitude], "-33,17133333");
        assert_eq!(row[mapping.longitude], "-70,75033333");
        assert_eq!(row[mapping.area_square_meters], "25000,00");
        assert_eq!(row[mapping.plants_per_hectare], "4000");
        assert_eq!(row[mapping.emitters_per_hectare], "2001");
    }

    #[tokio::test]
    async fn test_malformed_location_leaves_coordinates_untouched() {
        let mapping = SheetMapping::default();
        let saver = RecordSaver::new(seeded_store(&mapping));
        let edits = RecordEdits {
            location: Some("not a coordinate".to_string()),
            ..RecordEdits::default()
        };

        let report = saver.save(&mapping, 1, &edits).await.unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].field, "location");

        let row = &saver.store().snapshot()[1];
        assert_eq!(row[mapping.location], "not a coordinate");
        assert_eq!(row[mapping.latitude], "");
        assert_eq!(row[mapping.longitude], "");
    }

    #[tokio::test]
    async fn test_partial_batch_writes_the_valid_fields() {
        let mapping = SheetMapping::default();
        let saver = RecordSaver::new(seeded_store(&mapping));
        let edits = RecordEdits {
            crop: Some("Olivo".to_string()),
            area_hectares: Some("not an area".to_string()),
            ..RecordEdits::default()
        };

        let report = saver.save(&mapping, 1, &edits).await.unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].field, "area_hectares");
        assert!(matches!(report.warnings[0].error, FieldError::Format(_)));

        let row = &saver.store().snapshot()[1];
        assert_eq!(row[mapping.crop], "Olivo");
        assert_eq!(row[mapping.area_hectares], "2,50");
    }

    #[tokio::test]
    async fn test_density_warning_when_area_is_zero() {
        let mapping = SheetMapping::default();
        let saver = RecordSaver::new(seeded_store(&mapping));
        let edits = RecordEdits {
            area_hectares: Some("0".to_string()),
            plant_count: Some("100".to_string()),
            ..RecordEdits::default()
        };

        let report = saver.save(&mapping, 1, &edits).await.unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert!(matches!(report.warnings[0].error, FieldError::Density(_)));

        let row = &saver.store().snapshot()[1];
        assert_eq!(row[mapping.plants_per_hectare], "");
    }

    #[tokio::test]
    async fn test_comment_selection_joins_into_the_comment_cell() {
        let mapping = SheetMapping::default();
        let saver = RecordSaver::new(seeded_store(&mapping));
        let edits = RecordEdits {
            comments: Some(vec![
                STANDARD_COMMENTS[6].to_string(),
                STANDARD_COMMENTS[8].to_string(),
            ]),
            ..RecordEdits::default()
        };

        saver.save(&mapping, 1, &edits).await.unwrap();
        let row = &saver.store().snapshot()[1];
        assert_eq!(
            row[mapping.comments],
            "Incomplete crop data, Ask about missing data"
        );
    }
}

mod mapping_file_tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_mapping_loads_from_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapping.yaml");
        let yaml = serde_yaml::to_string(&SheetMapping::default()).unwrap();
        fs::write(&path, yaml).unwrap();

        let mapping = SheetMapping::from_file(&path).unwrap();
        assert_eq!(mapping, SheetMapping::default());
    }

    #[test]
    fn test_mapping_loads_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapping.json");
        let json = serde_json::to_string(&SheetMapping::default()).unwrap();
        fs::write(&path, json).unwrap();

        let mapping = SheetMapping::from_file(&path).unwrap();
        assert_eq!(mapping, SheetMapping::default());
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapping.toml");
        fs::write(&path, "account_id = 0").unwrap();

        assert!(SheetMapping::from_file(&path).is_err());
    }
}
