//! Required-field validation for submitted forms.

/// Names of required fields whose value is blank after trimming, in input order.
/// An empty result means the form is valid.
pub fn validate_required<'a, I>(fields: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    fields
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
}
