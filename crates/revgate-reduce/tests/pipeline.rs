//! End-to-end reduction over a realistic multi-file diff.

use revgate_core::ReduceConfig;
use revgate_reduce::{reduce, ReduceOptions};

fn sample_diff() -> String {
    let mut diff = String::new();

    // A modified python file with a function definition and a blank line.
    diff.push_str(
        "diff --git a/src/server.py b/src/server.py\n\
         --- a/src/server.py\n\
         +++ b/src/server.py\n\
         @@ -1,5 +1,7 @@\n \
         import  os\n\
         \n \
         def handle(request):\n\
         +    audit(request)  # record caller\n\
         +    return respond(request)\n",
    );

    // A markdown file that an extension filter should drop.
    diff.push_str(
        "diff --git a/CHANGELOG.md b/CHANGELOG.md\n\
         --- a/CHANGELOG.md\n\
         +++ b/CHANGELOG.md\n\
         @@ -1 +1,2 @@\n \
         # changelog\n\
         +- new entry\n",
    );

    // A large new file that must be truncated.
    diff.push_str("diff --git a/src/generated.py b/src/generated.py\n+++ b/src/generated.py\n");
    for i in 0..300 {
        diff.push_str(&format!("+generated_value_{i} = {i}\n"));
    }

    diff
}

#[test]
fn full_pipeline_filters_truncates_and_compresses() {
    let config = ReduceConfig {
        file_extensions: vec![".py".into()],
        max_new_file_lines: 50,
        ..ReduceConfig::default()
    };
    let options = ReduceOptions::from_config(&config).unwrap();

    let out = reduce(&sample_diff(), &options);

    // Markdown block filtered out.
    assert!(!out.contains("CHANGELOG.md"));
    assert!(!out.contains("new entry"));

    // Priority line from the python file survives.
    assert!(out.contains("def handle(request):"));

    // Trailing comment stripped by compression.
    assert!(!out.contains("record caller"));
    assert!(out.contains("audit(request)"));

    // The space-prefixed context line is not an import-statement start, so
    // it keeps its whitespace (only the blank line around it is gone).
    assert!(out.contains("import  os"));

    // New-file block truncated with a trailer.
    assert!(out.contains("new file)"));
    assert!(out.contains("... (truncated"));

    // No blank lines anywhere in the output.
    assert!(out.lines().all(|l| !l.trim().is_empty()));
}

#[test]
fn pipeline_without_filter_keeps_all_files() {
    let options = ReduceOptions::default();
    let out = reduce(&sample_diff(), &options);
    assert!(out.contains("server.py"));
    assert!(out.contains("CHANGELOG.md"));
}

#[test]
fn pipeline_is_total_on_non_diff_input() {
    let options = ReduceOptions::default();
    let out = reduce("just some prose\nwith two lines\n", &options);
    assert!(out.contains("just some prose"));
}

#[test]
fn filtered_to_nothing_yields_empty_string() {
    let config = ReduceConfig {
        file_extensions: vec![".go".into()],
        ..ReduceConfig::default()
    };
    let options = ReduceOptions::from_config(&config).unwrap();
    assert!(reduce(&sample_diff(), &options).is_empty());
}
