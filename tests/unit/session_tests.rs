/*!
 * Tests for the line-oriented editor session
 */

use std::path::PathBuf;
use anyhow::Result;
use vttedit::app_config::Config;
use vttedit::app_controller::Controller;
use vttedit::errors::EditorError;
use vttedit::session::{EditorSession, SessionCommand};
use crate::common;

fn sample_controller() -> Controller {
    let mut controller = Controller::with_config(Config::default());
    controller.load_str(common::SAMPLE_VTT);
    controller
}

async fn run_script(controller: Controller, script: &str, output_dir: PathBuf) -> Result<(Controller, String)> {
    common::init_test_logging();
    let mut session = EditorSession::new(controller, script.as_bytes(), Vec::new(), output_dir);
    session.run().await?;
    let (controller, output) = session.into_parts();
    Ok((controller, String::from_utf8(output)?))
}

/// Test parsing of every command form
#[test]
fn test_parse_command_withValidLines_shouldParse() {
    assert_eq!("list".parse::<SessionCommand>().unwrap(), SessionCommand::List);
    assert_eq!("select 3".parse::<SessionCommand>().unwrap(), SessionCommand::Select(3));
    assert_eq!(
        "text 1 hello\\nworld ".parse::<SessionCommand>().unwrap(),
        SessionCommand::Text(1, "hello\nworld ".to_string())
    );
    assert_eq!("tags 0".parse::<SessionCommand>().unwrap(), SessionCommand::Tags(0, String::new()));
    assert_eq!(
        "tags 2 #a #b ".parse::<SessionCommand>().unwrap(),
        SessionCommand::Tags(2, "#a #b ".to_string())
    );
    assert_eq!("merge".parse::<SessionCommand>().unwrap(), SessionCommand::Merge);
    assert_eq!("save".parse::<SessionCommand>().unwrap(), SessionCommand::Save(None));
    assert_eq!(
        "save out/x.vtt".parse::<SessionCommand>().unwrap(),
        SessionCommand::Save(Some(PathBuf::from("out/x.vtt")))
    );
    assert_eq!(
        "header a: 1".parse::<SessionCommand>().unwrap(),
        SessionCommand::Header("a: 1".to_string())
    );
    assert_eq!("q".parse::<SessionCommand>().unwrap(), SessionCommand::Quit);
}

/// Test that bad lines are rejected with a command error
#[test]
fn test_parse_command_withInvalidLines_shouldFail() {
    for line in ["", "bogus", "select", "select x", "text abc hello", "load  "] {
        let result = line.parse::<SessionCommand>();
        assert!(matches!(result, Err(EditorError::Command(_))), "line {:?} should fail", line);
    }
}

/// Test a full session: select, merge, tag through the prompt, save
#[tokio::test]
async fn test_run_withMergeAndTagScript_shouldSaveResult() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let out_path = temp_dir.path().join("result.vtt");
    let script = format!(
        "select 0\nselect 1\nmerge\nselect 0\ntag\nspeaker\nsave {}\nquit\n",
        out_path.display()
    );

    let (controller, output) = run_script(sample_controller(), &script, temp_dir.path().to_path_buf()).await?;

    assert!(output.contains("merged into block 0"));
    assert!(output.contains("Enter a tag (without #):"));
    assert!(output.contains("saved"));

    let blocks = &controller.document().blocks;
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].tags, "#intro #speaker ");
    assert_eq!(blocks[0].text, "Hello World");

    let saved = common::read_file(&out_path)?;
    assert!(saved.starts_with("---\nproject:\ninterviewee:\ndate:\n---\n\nWEBVTT\n\n"));
    assert!(saved.contains("00:00:00.000 --> 00:00:04.000\n#intro #speaker \nHello World\n\n"));
    assert!(saved.contains("00:00:04.000 --> 00:00:06.000\n#outro #end \nGoodbye\n"));
    Ok(())
}

/// Test that save without a path writes the configured file name
#[tokio::test]
async fn test_run_withPlainSave_shouldWriteDefaultFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    run_script(sample_controller(), "header project: x\nsave\n", temp_dir.path().to_path_buf()).await?;

    let saved = common::read_file(&temp_dir.path().join("edited.vtt"))?;
    assert!(saved.starts_with("---\nproject: x\n---\n\nWEBVTT\n\n"));
    Ok(())
}

/// Test that errors are reported and the session keeps going
#[tokio::test]
async fn test_run_withBadCommands_shouldReportAndContinue() -> Result<()> {
    let script = "bogus\nselect 7\nmerge\ntext 0 changed\n";

    let (controller, output) = run_script(sample_controller(), script, PathBuf::new()).await?;

    assert!(output.contains("error: Invalid command: unknown command 'bogus'"));
    assert!(output.contains("error: Block 7 does not exist (document has 3 blocks)"));
    assert!(output.contains("select at least two adjacent blocks to merge"));
    assert_eq!(controller.document().blocks[0].text, "changed");
    Ok(())
}

/// Test that tags added in a session are listed
#[tokio::test]
async fn test_run_withUsedTags_shouldListTags() -> Result<()> {
    let script = "select 2\ntag\nb\ntag\na\nused-tags\n";

    let (controller, output) = run_script(sample_controller(), script, PathBuf::new()).await?;

    assert!(output.contains("a b\n"));
    assert_eq!(controller.document().blocks[2].tags, "#outro #end #b #a ");
    Ok(())
}

/// Test that a tag entered with nothing selected is still listed
#[tokio::test]
async fn test_run_withTagAndNoSelection_shouldOnlyRecordTag() -> Result<()> {
    let script = "tag
foo
used-tags
";
    let before = sample_controller().document().clone();

    let (controller, output) = run_script(sample_controller(), script, PathBuf::new()).await?;

    assert!(output.contains("Enter a tag (without #):"));
    assert!(output.contains("foo\n"));
    assert_eq!(controller.document(), &before);
    Ok(())
}

/// Test that loading a file through the session replaces the document
#[tokio::test]
async fn test_run_withLoad_shouldReplaceDocument() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "other.vtt", &common::numbered_vtt(5))?;
    let script = format!("select 0\nload {}\nlist\n", path.display());

    let (controller, output) = run_script(sample_controller(), &script, PathBuf::new()).await?;

    assert_eq!(controller.document().len(), 5);
    assert!(controller.selection().is_empty());
    assert!(output.contains("[4] 00:00:04.000 --> 00:00:05.000"));
    Ok(())
}
