quantity!(Grams, f64, "g");
quantity!(Kilograms, f64, "kg");

impl From<Grams> for Kilograms {
    fn from(grams: Grams) -> Self {
        Self(grams.0 * 0.001)
    }
}
