#![allow(dead_code)]

use std::io::Cursor;
use subforge::alphabet::Alphabet;
use subforge::model::{TransitionModel, TransitionModelBuilder};

pub const FLOOR: f64 = 2.061_153_622_438_558e-9; // e^-20

pub const CORPUS: &str = "\
sarah is a cheerful and enthusiastic student who eagerly attends school each day
she thrives on the opportunity to expand her knowledge and discover new things
among all her subjects math holds a special place in her heart
the joy of solving equations and understanding mathematical concepts fills her with a sense of accomplishment
alongside her academic pursuits sarah values the friendships she has cultivated at school
during recess she and her friends engage in various games and activities laughing and sharing stories
outside of school hours sarah often immerses herself in the world of books
in the bustling kitchen of a vibrant restaurant you will find john a dedicated chef
with precision and creativity john crafts mouthwatering dishes that tantalize the taste buds of eager customers
his culinary journey began in the kitchen of his grandmother where he absorbed the secrets of traditional cooking
";

pub const MESSAGE: &str = "the chef and the student share stories of school and cooking, 42 times over!";

/// `{a, b, c}` with `(a,b)` and `(b,c)` carrying almost all of the mass.
pub fn abc_model() -> (Alphabet, TransitionModel) {
    let alphabet = Alphabet::new("abc".chars()).unwrap();
    let heavy = 0.5 - 3.5 * FLOOR;
    let mut probs = vec![FLOOR; 9];
    probs[1] = heavy; // a -> b
    probs[5] = heavy; // b -> c
    let model = TransitionModel::from_dense(alphabet.clone(), probs).unwrap();
    (alphabet, model)
}

pub fn lowercase_alphabet() -> Alphabet {
    Alphabet::new("abcdefghijklmnopqrstuvwxyz ".chars()).unwrap()
}

pub fn english_model() -> (Alphabet, TransitionModel) {
    let alphabet = lowercase_alphabet();
    let model = TransitionModelBuilder::new(alphabet.clone())
        .train(Cursor::new(CORPUS))
        .unwrap();
    (alphabet, model)
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}
