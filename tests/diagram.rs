use attnviz::diagram::{
    border, circle_symbol, matrix, BorderOptions, CircleSymbolOptions, EdgeLabels, MatrixOptions,
    Symbol, ToeplitzConfig,
};
use attnviz::surface::Node;
use attnviz::typeset::BoxTypesetter;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn small_opts() -> MatrixOptions {
    MatrixOptions {
        rows: 4,
        cols: 4,
        cell_width: 10.0,
        cell_height: 10.0,
        ..MatrixOptions::default()
    }
}

/// Collect `(row, col, node)` for every cell rect in a rendered matrix
/// group, recovering indices from the cell positions.
fn cells(group: &Node, opts: &MatrixOptions) -> Vec<(usize, usize, Node)> {
    let cell_w = format!("{}", opts.cell_width - 1.0);
    group
        .children()
        .iter()
        .filter(|n| {
            n.tag() == "rect" && n.attr("width") == Some(cell_w.as_str()) && n.attr("x").is_some()
        })
        .map(|n| {
            let x: f32 = n.attr("x").unwrap().parse().unwrap();
            let y: f32 = n.attr("y").unwrap().parse().unwrap();
            let col = ((x - 0.5) / opts.cell_width).round() as usize;
            let row = ((y - 0.5) / opts.cell_height).round() as usize;
            (row, col, n.clone())
        })
        .collect()
}

#[test]
fn renders_one_cell_per_grid_slot() {
    let mut surface = Node::new("g");
    let mut rng = StdRng::seed_from_u64(1);
    let opts = small_opts();
    matrix(&mut surface, &mut rng, None, &opts);

    let group = &surface.children()[0];
    assert_eq!(group.tag(), "g");
    let found = cells(group, &opts);
    assert_eq!(found.len(), 16);
    for (_, _, cell) in &found {
        let opacity: f32 = cell.attr("opacity").unwrap().parse().unwrap();
        assert!((0.5..0.9).contains(&opacity));
    }
}

#[test]
fn mask_wins_over_every_other_coloring_policy() {
    let mut surface = Node::new("g");
    let mut rng = StdRng::seed_from_u64(1);
    let opts = MatrixOptions {
        mask_upper_diagonal: true,
        row_colors: Some(vec![
            "#111111".to_string(),
            "#222222".to_string(),
            "#333333".to_string(),
            "#444444".to_string(),
        ]),
        toeplitz: Some(ToeplitzConfig {
            offsets: vec![0],
            colors: vec!["#ff0000".to_string()],
            clip_to: Some(0),
        }),
        ..small_opts()
    };
    matrix(&mut surface, &mut rng, None, &opts);

    for (row, col, cell) in cells(&surface.children()[0], &opts) {
        if col > row {
            assert_eq!(cell.attr("fill"), Some(opts.mask_color.as_str()));
            assert_eq!(cell.attr("opacity"), Some("0.8"));
        } else {
            assert_ne!(cell.attr("fill"), Some(opts.mask_color.as_str()));
        }
    }
}

#[test]
fn toeplitz_lookup_colors_by_diagonal_offset() {
    let mut surface = Node::new("g");
    let mut rng = StdRng::seed_from_u64(1);
    let opts = MatrixOptions {
        toeplitz: Some(ToeplitzConfig {
            offsets: vec![0, 1, -1],
            colors: vec![
                "#aa0000".to_string(),
                "#00aa00".to_string(),
                "#0000aa".to_string(),
            ],
            clip_to: None,
        }),
        ..small_opts()
    };
    matrix(&mut surface, &mut rng, None, &opts);

    for (row, col, cell) in cells(&surface.children()[0], &opts) {
        let fill = cell.attr("fill").unwrap();
        match row as i64 - col as i64 {
            0 => assert_eq!(fill, "#aa0000"),
            1 => assert_eq!(fill, "#00aa00"),
            -1 => assert_eq!(fill, "#0000aa"),
            // Offsets outside the configured bands fall back to the
            // random gradient.
            _ => assert!(fill.starts_with("rgb("), "got {}", fill),
        }
    }
}

#[test]
fn toeplitz_clipping_folds_extremes_into_nearest_band() {
    let mut surface = Node::new("g");
    let mut rng = StdRng::seed_from_u64(1);
    let opts = MatrixOptions {
        toeplitz: Some(ToeplitzConfig {
            offsets: vec![0],
            colors: vec!["#ff0000".to_string()],
            clip_to: Some(0),
        }),
        ..small_opts()
    };
    matrix(&mut surface, &mut rng, None, &opts);

    for (_, _, cell) in cells(&surface.children()[0], &opts) {
        assert_eq!(cell.attr("fill"), Some("#ff0000"));
    }
}

#[test]
fn row_colors_apply_per_row() {
    let mut surface = Node::new("g");
    let mut rng = StdRng::seed_from_u64(1);
    let row_colors = vec![
        "#111111".to_string(),
        "#222222".to_string(),
        "#333333".to_string(),
        "#444444".to_string(),
    ];
    let opts = MatrixOptions {
        row_colors: Some(row_colors.clone()),
        ..small_opts()
    };
    matrix(&mut surface, &mut rng, None, &opts);

    for (row, _, cell) in cells(&surface.children()[0], &opts) {
        assert_eq!(cell.attr("fill"), Some(row_colors[row].as_str()));
    }
}

#[test]
fn same_seed_renders_identically() {
    let opts = small_opts();
    let render = |seed| {
        let mut surface = Node::new("g");
        let mut rng = StdRng::seed_from_u64(seed);
        matrix(&mut surface, &mut rng, None, &opts);
        surface.to_svg()
    };
    assert_eq!(render(7), render(7));
    assert_ne!(render(7), render(8));
}

#[test]
fn highlight_border_is_drawn_behind_the_matrix() {
    let mut surface = Node::new("g");
    let mut rng = StdRng::seed_from_u64(1);
    let opts = MatrixOptions {
        highlight: true,
        ..small_opts()
    };
    matrix(&mut surface, &mut rng, None, &opts);

    let group = &surface.children()[0];
    let first = &group.children()[0];
    assert_eq!(first.tag(), "rect");
    assert_eq!(first.attr("stroke"), Some(opts.highlight_color.as_str()));
    assert_eq!(first.attr("fill"), Some("none"));
}

#[test]
fn edge_labels_render_only_with_an_engine() {
    let opts = MatrixOptions {
        labels_bottom: EdgeLabels {
            center: "QK^T".to_string(),
            ..EdgeLabels::default()
        },
        ..small_opts()
    };

    let mut without = Node::new("g");
    let mut rng = StdRng::seed_from_u64(1);
    matrix(&mut without, &mut rng, None, &opts);
    let plain = without.children()[0]
        .children()
        .iter()
        .filter(|n| n.tag() == "g")
        .count();
    assert_eq!(plain, 0);

    let mut with = Node::new("g");
    let mut rng = StdRng::seed_from_u64(1);
    let engine = BoxTypesetter;
    matrix(&mut with, &mut rng, Some(&engine), &opts);
    let labels: Vec<_> = with.children()[0]
        .children()
        .iter()
        .filter(|n| n.tag() == "g")
        .collect();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].children()[0].tag(), "svg");
}

#[test]
fn row_and_col_labels_are_text_nodes() {
    let mut surface = Node::new("g");
    let mut rng = StdRng::seed_from_u64(1);
    let opts = MatrixOptions {
        row_labels: Some(vec!["q".to_string(), "k".to_string()]),
        col_labels: Some(vec!["t0".to_string(), "t1".to_string()]),
        ..small_opts()
    };
    matrix(&mut surface, &mut rng, None, &opts);

    let texts: Vec<_> = surface.children()[0]
        .children()
        .iter()
        .filter(|n| n.tag() == "text")
        .collect();
    assert_eq!(texts.len(), 4);
    // Column labels carry the default -45 degree rotation.
    assert!(texts
        .iter()
        .any(|t| t.attr("transform").map_or(false, |v| v.contains("rotate(-45"))));
}

#[test]
fn border_draws_dashed_rect_and_corner_label() {
    let mut surface = Node::new("g");
    let mut opts = BorderOptions::new(200.0, 100.0);
    opts.label = "encoder".to_string();
    border(&mut surface, &opts);

    let group = &surface.children()[0];
    assert_eq!(group.len(), 3);
    assert_eq!(group.children()[0].attr("stroke-dasharray"), Some("8,4"));
    // Label background masks the border behind the text.
    assert_eq!(
        group.children()[1].attr("fill"),
        Some(opts.bg_color.as_str())
    );
    assert_eq!(group.children()[2].tag(), "text");
    assert_eq!(group.children()[2].attr("font-weight"), Some("bold"));
}

#[test]
fn border_without_label_is_just_the_rect() {
    let mut surface = Node::new("g");
    border(&mut surface, &BorderOptions::new(50.0, 50.0));
    assert_eq!(surface.children()[0].len(), 1);
}

#[test]
fn circle_symbol_variants() {
    let mut surface = Node::new("g");
    circle_symbol(&mut surface, &CircleSymbolOptions::default());
    let plus = &surface.children()[0];
    assert_eq!(plus.children()[0].tag(), "circle");
    // Plus variant: one horizontal and one vertical stroke.
    assert_eq!(plus.children()[1].attr("y1"), Some("0"));
    assert_eq!(plus.children()[2].attr("x1"), Some("0"));

    circle_symbol(
        &mut surface,
        &CircleSymbolOptions {
            symbol: Symbol::Cross,
            ..CircleSymbolOptions::default()
        },
    );
    let cross = &surface.children()[1];
    // Cross variant: both strokes are diagonal.
    assert_eq!(cross.children()[1].attr("x1"), Some("-6"));
    assert_eq!(cross.children()[1].attr("y1"), Some("-6"));
}
