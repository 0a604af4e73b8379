/*!
 * Column type → short display tag
 *
 * Maps the base name of a declared type (no size/precision, no trailing
 * qualifier) to a glyph. Unknown types resolve to `?`.
 *
 * One departure from that base-name rule: Databend reports nullable columns
 * as `Nullable(T)`, and the bare `nullable` token would always be `?`. Those
 * are tagged as `T` instead.
 */

pub const UNKNOWN_TYPE: &str = "?";

/// Shorten a declared column type to its display tag
pub fn shorten(type_name: &str) -> &'static str {
    let base = base_type_name(type_name);
    if base == "nullable" {
        if let Some(inner) = nullable_inner(type_name) {
            return shorten(inner);
        }
    }
    lookup(&base).unwrap_or(UNKNOWN_TYPE)
}

/// Lower-cased token before the first `(` and then the first space
pub fn base_type_name(type_name: &str) -> String {
    let before_paren = type_name.split('(').next().unwrap_or(type_name);
    let base = before_paren.split(' ').next().unwrap_or(before_paren);
    base.to_lowercase()
}

/// `Nullable(Int32)` → `Int32`
fn nullable_inner(type_name: &str) -> Option<&str> {
    let open = type_name.find('(')?;
    let close = type_name.rfind(')')?;
    (close > open + 1).then(|| type_name[open + 1..close].trim())
}

fn lookup(base: &str) -> Option<&'static str> {
    let tag = match base {
        "bigint" | "bigserial" => "##",
        "bit" => "010",
        "boolean" => "t/f",
        "box" => "□",
        "bytea" => "b",
        "character" => "s",
        "cidr" => "ip",
        "circle" => "○",
        "date" => "d",
        "double" => "#.#",
        "inet" => "ip",
        "integer" => "#",
        "interval" => "|-|",
        "json" => "{}",
        "jsonb" => "b{}",
        "line" => "—",
        "lseg" => "-",
        "macaddr" | "macaddr8" => "mac",
        "money" => "$$",
        "numeric" => "#.#",
        "path" => "╭",
        "pg_lsn" => "lsn",
        "pg_snapshot" | "txid_snapshot" => "snp",
        "point" => "•",
        "polygon" => "▽",
        "real" => "#.#",
        "smallint" | "smallserial" | "serial" => "#",
        "text" => "s",
        "time" => "t",
        "timestamp" => "ts",
        "tsquery" => "tsq",
        "tsvector" => "tsv",
        "uuid" => "uid",
        "xml" => "xml",
        "array" => "[]",

        // Databend spellings
        "bool" => "t/f",
        "tinyint" | "int" | "int8" | "int16" | "int32" | "uint8" | "uint16" | "uint32" => "#",
        "int64" | "uint64" => "##",
        "float" | "float32" | "float64" | "decimal" => "#.#",
        "string" | "varchar" | "char" => "s",
        "binary" | "varbinary" => "b",
        "datetime" => "ts",
        "variant" => "{}",
        "tuple" => "()",
        "map" => "{:}",
        "bitmap" => "010",
        "geometry" | "geography" => "•",
        _ => return None,
    };
    Some(tag)
}
