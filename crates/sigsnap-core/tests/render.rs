//! Tests for frame formatting and caller-chain walking

use sigsnap_core::format::FrameFormatter;
use sigsnap_core::types::FrameSnapshot;
use sigsnap_core::walk::StackWalker;

/// Three-deep chain: `inner` called by `middle` called by `outer`.
fn sample_chain() -> FrameSnapshot
{
    let outer = FrameSnapshot::new("outer", 10, "<scope outer at demo.rs:8>");
    let middle = FrameSnapshot::new("middle", 25, "<scope middle at demo.rs:20>").with_parent(outer);
    let mut inner = FrameSnapshot::new("inner", 42, "<scope inner at demo.rs:40>").with_parent(middle);
    inner.record("count", 7u64);
    inner.record("label", "busy");
    inner
}

fn render_frame(frame: &FrameSnapshot, columns: usize) -> String
{
    let mut out = Vec::new();
    FrameFormatter::new(columns)
        .write_frame(&mut out, frame)
        .expect("write to a Vec cannot fail");
    String::from_utf8(out).expect("rendered output is UTF-8")
}

fn render_walk(frame: &FrameSnapshot, columns: usize, max_levels: usize) -> String
{
    let mut out = Vec::new();
    StackWalker::new(columns, max_levels)
        .dump(&mut out, "FullDump", frame)
        .expect("write to a Vec cannot fail");
    String::from_utf8(out).expect("rendered output is UTF-8")
}

#[test]
fn test_frame_block_line_order()
{
    let rendered = render_frame(&sample_chain(), 80);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[0], "METHOD\t\tinner");
    assert_eq!(lines[1], "LINE NUMBER:\t42");
    assert_eq!(lines[2], "-".repeat(80));
    assert_eq!(lines[3], "LOCALS");
    // Header row plus the two recorded locals
    assert!(lines[4].starts_with("VARIABLE"));
    assert!(lines[5].starts_with("count"));
    assert!(lines[6].starts_with("label"));
    assert_eq!(lines[7], "-".repeat(80));
    assert_eq!(lines[8], "SCOPE\t<scope inner at demo.rs:40>");
    assert_eq!(lines[9], "CALLER\t<scope middle at demo.rs:20>");
}

#[test]
fn test_root_frame_has_no_caller()
{
    let root = FrameSnapshot::new("main", 3, "<scope main at demo.rs:1>");
    let rendered = render_frame(&root, 60);
    assert!(rendered.lines().any(|line| line == "CALLER\tNONE"));
}

#[test]
fn test_walk_renders_banner_first()
{
    let rendered = render_walk(&sample_chain(), 80, 0);
    let mut lines = rendered.lines();
    assert_eq!(lines.next(), Some(""));
    assert_eq!(lines.next(), Some("FullDump"));
}

#[test]
fn test_walk_depth_limits_rendered_levels()
{
    let chain = sample_chain();

    for (max_levels, expected) in [(1, 1), (2, 2), (3, 3), (5, 3), (0, 3)] {
        let rendered = render_walk(&chain, 80, max_levels);
        let levels: Vec<&str> = rendered
            .lines()
            .filter(|line| line.starts_with("LEVEL"))
            .collect();
        assert_eq!(levels.len(), expected, "max_levels = {max_levels}");
    }
}

#[test]
fn test_walk_levels_numbered_from_zero()
{
    let rendered = render_walk(&sample_chain(), 80, 2);
    let levels: Vec<&str> = rendered
        .lines()
        .filter(|line| line.starts_with("LEVEL"))
        .collect();
    assert_eq!(levels, vec!["LEVEL    \t0", "LEVEL    \t1"]);
}

#[test]
fn test_walk_second_block_caller_is_third_frame()
{
    // With depth 2 the last rendered frame is `middle`; its CALLER line
    // must name the third frame's scope identity.
    let rendered = render_walk(&sample_chain(), 80, 2);
    let callers: Vec<&str> = rendered
        .lines()
        .filter(|line| line.starts_with("CALLER"))
        .collect();
    assert_eq!(callers.len(), 2);
    assert_eq!(callers[1], "CALLER\t<scope outer at demo.rs:8>");
}

#[test]
fn test_walk_blocks_are_delimited()
{
    let rendered = render_walk(&sample_chain(), 40, 3);
    let delimiter = "=".repeat(40);
    let count = rendered.lines().filter(|&line| line == delimiter).count();
    // One opening and one closing delimiter per block
    assert_eq!(count, 6);
}
