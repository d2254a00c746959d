use sqd_model::Attributes;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VariantMatch {
    pub index: usize,
    pub attributes: Attributes,
}

/// Exact value match of `sample` against `variants`.
///
/// Returns the lowest matching index. Value-identical variants carry no
/// other disambiguation signal, so declaration order decides.
pub fn match_variant(variants: &[Attributes], sample: &Attributes) -> Option<VariantMatch> {
    variants
        .iter()
        .position(|v| v == sample)
        .map(|index| VariantMatch {
            index,
            attributes: *sample,
        })
}
