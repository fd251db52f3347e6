use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use subforge::alphabet::Alphabet;
use subforge::api::SolveReport;
use subforge::cipher::Permutation;
use subforge::model::TransitionModel;

fn visible(c: char) -> String {
    match c {
        ' ' => "␣".to_string(),
        _ => c.to_string(),
    }
}

/// Plain -> cipher mapping, two rows per chunk of the alphabet.
pub fn print_key_table(alphabet: &Alphabet, cipher: &Permutation) {
    println!("\nKey (plain -> cipher):");
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let cols = 20;
    for (plain, enc) in alphabet
        .symbols()
        .chunks(cols)
        .zip(cipher.symbols().chunks(cols))
    {
        let plain_row: Vec<Cell> = plain
            .iter()
            .map(|&c| {
                Cell::new(visible(c))
                    .set_alignment(CellAlignment::Center)
                    .add_attribute(Attribute::Bold)
            })
            .collect();
        let enc_row: Vec<Cell> = enc
            .iter()
            .map(|&c| Cell::new(visible(c)).set_alignment(CellAlignment::Center))
            .collect();
        table.add_row(plain_row);
        table.add_row(enc_row);
    }
    println!("{}", table);
}

pub fn print_search_summary(report: &SolveReport) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Log-Likelihood").fg(Color::Cyan),
        Cell::new("Chain"),
        Cell::new("Iterations"),
        Cell::new("Accepted"),
        Cell::new("Rate"),
        Cell::new("Time (ms)"),
    ]);
    table.add_row(vec![
        Cell::new(format!("{:.4}", report.score)).add_attribute(Attribute::Bold),
        Cell::new(report.chain),
        Cell::new(report.iterations),
        Cell::new(report.accepted),
        Cell::new(format!("{:.2}%", report.acceptance_rate * 100.0)),
        Cell::new(report.elapsed_ms),
    ]);
    for i in 0..6 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("{}", table);
}

/// Most probable transitions of a freshly built model.
pub fn print_model_summary(model: &TransitionModel, top_n: usize) {
    let mut entries: Vec<(char, char, f64)> = model.entries().collect();
    entries.sort_by(|a, b| b.2.total_cmp(&a.2));

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec![
        Cell::new("Bigram").add_attribute(Attribute::Bold),
        Cell::new("Probability").fg(Color::Green),
        Cell::new("ln p"),
    ]);
    for (a, b, p) in entries.into_iter().take(top_n) {
        table.add_row(vec![
            Cell::new(format!("{}{}", visible(a), visible(b))),
            Cell::new(format!("{:.6}", p)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.3}", p.ln())).set_alignment(CellAlignment::Right),
        ]);
    }

    println!(
        "\nModel: {} symbols, total mass {:.9}",
        model.alphabet().len(),
        model.total_mass()
    );
    println!("{}", table);
}
