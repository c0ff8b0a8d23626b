/*!
 * Integration tests for the load, edit and save workflow
 */

use anyhow::Result;

use vttedit::app_config::Config;
use vttedit::app_controller::{Controller, EditEvent};
use vttedit::file_utils::FileManager;
use vttedit::vtt_document::VttDocument;
use crate::common;
use crate::common::scripted_prompt::ScriptedPrompt;

/// Test that we can load, edit, merge, tag and save a file
#[tokio::test]
async fn test_editing_workflow_withFullProcess_shouldSucceed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_vtt(temp_dir.path(), "interview.vtt")?;
    let output = FileManager::generate_output_path(&input, "edited.vtt");

    let mut controller = Controller::with_config(Config::default());
    controller.load_file(&input).await?;
    assert_eq!(controller.document().len(), 3);

    // 1. Edit a block
    controller.apply(EditEvent::Text { index: 2, text: "See you".to_string() })?;

    // 2. Merge the first two blocks
    controller.apply(EditEvent::ToggleSelection(0))?;
    controller.apply(EditEvent::ToggleSelection(1))?;
    assert!(controller.view().merge_visible);
    assert_eq!(controller.merge_selected(), Some(0));

    // 3. Tag the last block
    controller.apply(EditEvent::ToggleSelection(1))?;
    let mut prompt = ScriptedPrompt::new(vec![Some("farewell")]);
    assert!(controller.add_tag(&mut prompt).await?);

    // 4. Replace the header and save
    controller.apply(EditEvent::Header("project: Demo".to_string()))?;
    controller.save(&output).await?;

    let saved = FileManager::read_to_string(&output)?;
    assert_eq!(
        saved,
        "---\nproject: Demo\n---\n\nWEBVTT\n\n\
         00:00:00.000 --> 00:00:04.000\n#intro \nHello World\n\n\
         00:00:04.000 --> 00:00:06.000\n#outro #end #farewell \nSee you\n\n"
    );
    Ok(())
}

/// Test that a saved file without its header parses back into the same blocks
#[test]
fn test_saved_body_whenReparsed_shouldKeepBlockOrder() -> Result<()> {
    let mut controller = Controller::with_config(Config::default());
    controller.load_str(&common::numbered_vtt(4));

    let exported = controller.export();
    let body = exported
        .split_once("WEBVTT")
        .map(|(_, body)| body)
        .unwrap_or_default();
    let reparsed = VttDocument::parse(body);

    let timestamps: Vec<&str> = reparsed.blocks.iter().map(|b| b.timestamp.as_str()).collect();
    let expected: Vec<&str> = controller.document().blocks.iter().map(|b| b.timestamp.as_str()).collect();
    assert_eq!(timestamps, expected);
    Ok(())
}

/// Test that loading a missing file fails and keeps the previous document
#[test]
fn test_load_file_withMissingFile_shouldKeepDocument() {
    let mut controller = Controller::with_config(Config::default());
    controller.load_str(common::SAMPLE_VTT);

    let result = tokio_test::block_on(controller.load_file("does_not_exist_12345.vtt"));

    assert!(result.is_err());
    assert_eq!(controller.document().len(), 3);
}

/// Test that the last completed load wins
#[tokio::test]
async fn test_load_file_twice_shouldKeepLastDocument() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let first = common::create_test_vtt(temp_dir.path(), "first.vtt")?;
    let second = common::create_test_file(temp_dir.path(), "second.vtt", &common::numbered_vtt(6))?;

    let mut controller = Controller::with_config(Config::default());
    controller.load_file(&first).await?;
    controller.load_file(&second).await?;

    assert_eq!(controller.document().len(), 6);
    Ok(())
}
