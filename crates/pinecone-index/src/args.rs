//! Argument assembly
//!
//! Every operation omits the optional fields a caller left unset so the
//! server applies its own defaults. Typed request records get this from
//! `skip_serializing_if`; places that assemble parameters by hand (query
//! strings, selector checks) go through [`parse_args`].

/// Keep only the `(name, value)` pairs whose value is present, in order
///
/// Present-but-falsy values (`0`, `false`, an empty list) are kept.
pub fn parse_args<'a, V, I>(args: I) -> Vec<(&'a str, V)>
where
    I: IntoIterator<Item = (&'a str, Option<V>)>,
{
    args.into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
}

/// Names of the present arguments, in order
pub fn present_names<'a, V, I>(args: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = (&'a str, Option<V>)>,
{
    parse_args(args).into_iter().map(|(name, _)| name).collect()
}
