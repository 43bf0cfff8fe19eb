//! Integration Tests for mcqsplit
//!
//! Builds fixture workbooks in memory with rust_xlsxwriter, runs them through
//! the processor and reads the results back with calamine.

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use chrono::NaiveDate;
use mcqsplit::{
    CellValue, FormulaMode, McqSplitError, ProcessorBuilder, RowError, SheetSelector,
};
use rust_xlsxwriter::*;
use std::io::Cursor;

// Helper module for generating test fixtures
mod fixtures {
    use super::*;

    /// Write the header row used by every fixture
    pub fn write_header(worksheet: &mut Worksheet) -> Result<(), XlsxError> {
        for (col, name) in ["Qno", "Description", "Level", "Code", "Subject"]
            .iter()
            .enumerate()
        {
            worksheet.write_string(0, col as u16, *name)?;
        }
        Ok(())
    }

    /// Generate a sheet mixing parseable, short and pre-excluded rows
    pub fn generate_question_sheet() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        write_header(worksheet)?;

        // Row 2: parses
        worksheet.write_number(1, 0, 1.0)?;
        worksheet.write_string(1, 1, "What is 2+2? a. 3 b. 4 c. 5 d. 6")?;
        worksheet.write_string(1, 2, "Easy")?;
        worksheet.write_number(1, 3, 101.0)?;
        worksheet.write_string(1, 4, "Math")?;

        // Row 3: only three options
        worksheet.write_number(2, 0, 2.0)?;
        worksheet.write_string(2, 1, "Pick one a. x b. y c. z")?;

        // Row 4: formula identifier, description would otherwise parse
        worksheet.write_formula(3, 0, "=SUM(A2:A3)")?;
        worksheet.write_string(3, 1, "Capital of France? a. Paris b. Rome c. Oslo d. Bern")?;

        // Row 5: no description
        worksheet.write_string(4, 0, "Q5")?;

        // Row 6: numeric markers
        worksheet.write_string(5, 0, "Q6")?;
        worksheet.write_string(
            5,
            1,
            "Largest planet? 1. Mars 2. Jupiter 3. Venus 4. Earth",
        )?;
        worksheet.write_number(5, 2, 3.0)?;

        Ok(workbook.save_to_buffer()?)
    }

    /// Generate a workbook with the questions on the second sheet
    pub fn generate_multi_sheets() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();

        let notes = workbook.add_worksheet();
        notes.set_name("Notes")?;
        notes.write_string(0, 0, "Instructions")?;
        notes.write_string(1, 0, "Q-notes")?;
        notes.write_string(1, 1, "not a question")?;

        let questions = workbook.add_worksheet();
        questions.set_name("Questions")?;
        write_header(questions)?;
        questions.write_string(1, 0, "Q1")?;
        questions.write_string(1, 1, "Pick (a) one (b) two (c) three (d) four")?;

        Ok(workbook.save_to_buffer()?)
    }

    /// Generate a sheet with an empty row between two questions
    pub fn generate_sheet_with_gap() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        write_header(worksheet)?;

        worksheet.write_string(1, 0, "Q1")?;
        worksheet.write_string(1, 1, "One? a. 1 b. 2 c. 3 d. 4")?;
        worksheet.write_string(3, 0, "Q3")?;
        worksheet.write_string(3, 1, "Three? a. 1 b. 2 c. 3 d. 4")?;

        Ok(workbook.save_to_buffer()?)
    }

    /// Generate a sheet without a header row
    pub fn generate_headerless() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, "Q1")?;
        worksheet.write_string(0, 1, "One? a. 1 b. 2 c. 3 d. 4")?;
        Ok(workbook.save_to_buffer()?)
    }

    /// Generate a sheet whose subject column holds a formatted date
    pub fn generate_dated_subject() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        write_header(worksheet)?;

        let date_format = Format::new().set_num_format("yyyy-mm-dd");
        worksheet.write_string(1, 0, "Q1")?;
        worksheet.write_string(1, 1, "One? a. 1 b. 2 c. 3 d. 4")?;
        worksheet.write_datetime_with_format(
            1,
            4,
            &ExcelDateTime::from_ymd(2024, 5, 1)?,
            &date_format,
        )?;
        Ok(workbook.save_to_buffer()?)
    }
}

fn read_output(buffer: Vec<u8>) -> Xlsx<Cursor<Vec<u8>>> {
    open_workbook_from_rs(Cursor::new(buffer)).expect("output should be a valid workbook")
}

#[test]
fn test_process_question_sheet() {
    let data = fixtures::generate_question_sheet().unwrap();
    let processor = ProcessorBuilder::new().build().unwrap();

    let outcome = processor.process(Cursor::new(data)).unwrap();

    assert_eq!(outcome.processed_count(), 2);
    assert_eq!(outcome.skipped_count(), 3);

    let first = &outcome.processed[0];
    assert_eq!(first.identifier, CellValue::Number(1.0));
    assert_eq!(first.question, "What is 2+2?");
    assert_eq!(first.options, ["a. 3", "b. 4", "c. 5", "d. 6"]);
    assert_eq!(first.level, CellValue::from("Easy"));
    assert_eq!(first.code, CellValue::Number(101.0));
    assert_eq!(first.subject, CellValue::from("Math"));

    let second = &outcome.processed[1];
    assert_eq!(second.identifier, CellValue::from("Q6"));
    assert_eq!(second.option_a(), "1. Mars");
    assert_eq!(second.option_d(), "4. Earth");
    assert_eq!(second.level, CellValue::Number(3.0));

    let reasons: Vec<RowError> = outcome.skipped.iter().map(|s| s.reason.clone()).collect();
    assert_eq!(
        reasons,
        [
            RowError::OptionCountMismatch(3),
            RowError::PreExcluded,
            RowError::EmptyDescription,
        ]
    );
    assert_eq!(
        outcome.skipped[1].identifier,
        CellValue::from("=SUM(A2:A3)")
    );
    assert_eq!(
        outcome.skipped[0].description,
        CellValue::from("Pick one a. x b. y c. z")
    );
}

#[test]
fn test_cached_value_mode_does_not_pre_exclude_formulas() {
    let data = fixtures::generate_question_sheet().unwrap();
    let processor = ProcessorBuilder::new()
        .with_formula_mode(FormulaMode::CachedValue)
        .build()
        .unwrap();

    let outcome = processor.process(Cursor::new(data)).unwrap();

    assert_eq!(outcome.processed_count(), 3);
    assert!(outcome
        .skipped
        .iter()
        .all(|s| s.reason != RowError::PreExcluded));
}

#[test]
fn test_convert_writes_output_workbook() {
    let data = fixtures::generate_question_sheet().unwrap();
    let processor = ProcessorBuilder::new().build().unwrap();

    let mut output = Vec::new();
    processor.convert(Cursor::new(data), &mut output).unwrap();

    let mut workbook = read_output(output);
    assert_eq!(workbook.sheet_names(), ["Processed Data", "Skipped Data"]);

    let processed = workbook.worksheet_range("Processed Data").unwrap();
    assert_eq!(processed.height(), 3);
    assert_eq!(
        processed.get_value((0, 2)),
        Some(&Data::String("Option A".to_string()))
    );
    assert_eq!(
        processed.get_value((1, 1)),
        Some(&Data::String("What is 2+2?".to_string()))
    );
    assert_eq!(processed.get_value((1, 7)), Some(&Data::Float(101.0)));
    assert_eq!(
        processed.get_value((2, 0)),
        Some(&Data::String("Q6".to_string()))
    );

    let skipped = workbook.worksheet_range("Skipped Data").unwrap();
    assert_eq!(skipped.height(), 4);
    assert_eq!(skipped.width(), 2);
    assert_eq!(skipped.get_value((1, 0)), Some(&Data::Float(2.0)));
    assert_eq!(
        skipped.get_value((1, 1)),
        Some(&Data::String("Pick one a. x b. y c. z".to_string()))
    );
    assert_eq!(
        skipped.get_value((3, 0)),
        Some(&Data::String("Q5".to_string()))
    );

    // Formula identifiers are written back as formulas
    let formulas = workbook.worksheet_formula("Skipped Data").unwrap();
    assert_eq!(
        formulas.get_value((2, 0)),
        Some(&"SUM(A2:A3)".to_string())
    );
}

#[test]
fn test_sheet_selection() {
    let data = fixtures::generate_multi_sheets().unwrap();

    let by_name = ProcessorBuilder::new()
        .with_sheet_selector(SheetSelector::Name("Questions".to_string()))
        .build()
        .unwrap()
        .process(Cursor::new(data.clone()))
        .unwrap();
    assert_eq!(by_name.processed_count(), 1);
    assert_eq!(by_name.processed[0].option_c(), "(c) three");

    let by_index = ProcessorBuilder::new()
        .with_sheet_selector(SheetSelector::Index(1))
        .build()
        .unwrap()
        .process(Cursor::new(data.clone()))
        .unwrap();
    assert_eq!(by_index, by_name);

    // The first sheet holds notes only
    let first = ProcessorBuilder::new()
        .build()
        .unwrap()
        .process(Cursor::new(data))
        .unwrap();
    assert_eq!(first.processed_count(), 0);
    assert_eq!(first.skipped_count(), 1);
}

#[test]
fn test_unknown_sheet_is_config_error() {
    let data = fixtures::generate_multi_sheets().unwrap();

    let result = ProcessorBuilder::new()
        .with_sheet_selector(SheetSelector::Name("Missing".to_string()))
        .build()
        .unwrap()
        .process(Cursor::new(data.clone()));
    assert!(matches!(result, Err(McqSplitError::Config(_))));

    let result = ProcessorBuilder::new()
        .with_sheet_selector(SheetSelector::Index(5))
        .build()
        .unwrap()
        .process(Cursor::new(data));
    match result {
        Err(McqSplitError::Config(msg)) => assert!(msg.contains("out of range")),
        other => panic!("Expected Config error, got {:?}", other.map(|o| o.processed_count())),
    }
}

#[test]
fn test_empty_rows_inside_range_are_skipped() {
    let data = fixtures::generate_sheet_with_gap().unwrap();
    let outcome = ProcessorBuilder::new()
        .build()
        .unwrap()
        .process(Cursor::new(data))
        .unwrap();

    assert_eq!(outcome.processed_count(), 2);
    assert_eq!(outcome.skipped_count(), 1);
    assert_eq!(outcome.skipped[0].identifier, CellValue::Empty);
    assert_eq!(outcome.skipped[0].reason, RowError::EmptyDescription);
}

#[test]
fn test_header_rows_setting() {
    let data = fixtures::generate_headerless().unwrap();

    let skipped_header = ProcessorBuilder::new()
        .build()
        .unwrap()
        .process(Cursor::new(data.clone()))
        .unwrap();
    assert_eq!(skipped_header.processed_count(), 0);
    assert_eq!(skipped_header.skipped_count(), 0);

    let no_header = ProcessorBuilder::new()
        .with_header_rows(0)
        .build()
        .unwrap()
        .process(Cursor::new(data))
        .unwrap();
    assert_eq!(no_header.processed_count(), 1);
}

#[test]
fn test_input_size_limit() {
    let data = fixtures::generate_question_sheet().unwrap();
    let result = ProcessorBuilder::new()
        .with_max_input_size(16)
        .build()
        .unwrap()
        .process(Cursor::new(data));

    assert!(matches!(result, Err(McqSplitError::SecurityViolation(_))));
}

#[test]
fn test_reprocessing_is_idempotent() {
    let data = fixtures::generate_question_sheet().unwrap();
    let processor = ProcessorBuilder::new().build().unwrap();

    let first = processor.process(Cursor::new(data.clone())).unwrap();
    let second = processor.process(Cursor::new(data)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_date_attribute_passes_through_as_date() {
    let data = fixtures::generate_dated_subject().unwrap();
    let processor = ProcessorBuilder::new().build().unwrap();
    let expected = NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let mut output = Vec::new();
    let outcome = processor.convert(Cursor::new(data), &mut output).unwrap();
    assert_eq!(outcome.processed[0].subject, CellValue::DateTime(expected));

    let mut workbook = read_output(output);
    let processed = workbook.worksheet_range("Processed Data").unwrap();
    match processed.get_value((1, 8)) {
        Some(Data::DateTime(dt)) => assert_eq!(dt.as_datetime(), Some(expected)),
        other => panic!("expected a date cell in I2, got {:?}", other),
    }
}
