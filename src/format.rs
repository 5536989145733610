/*!

The marshal wire format, as far as this crate reads it.

A stream is a two-byte version header followed by exactly one value. The header is the major
version (4) and the minor version (8). Streams with a lower minor version are accepted, since
every version since 4.0 is a subset of 4.8.

# Integers

Lengths, counts, symbol links and fixnums all share one variable-length signed encoding. The
first byte `c`, read as an `i8`, decides the form:

| First byte      | Value                                                                 |
| --              | --                                                                    |
| `0`             | 0                                                                     |
| `6` to `127`    | `c - 5`, so 1 to 122                                                  |
| `-128` to `-6`  | `c + 5`, so -123 to -1                                                |
| `1` to `5`      | the next `c` bytes, little-endian, zero-extended                      |
| `-5` to `-1`    | the next `-c` bytes, little-endian, laid over all ones                |

Negative lengths and counts are rejected.

# Values

Every value starts with a one-byte type tag.

| Tag | Type         | Followed by                                                              |
| --  | --           | --                                                                       |
| `0` | nil          | nothing                                                                  |
| `T` | true         | nothing                                                                  |
| `F` | false        | nothing                                                                  |
| `i` | fixnum       | an integer                                                               |
| `f` | float        | a length and that many bytes of decimal text, or `nan`, `inf`, `-inf`    |
| `:` | symbol       | a length and that many bytes of text                                     |
| `;` | symbol link  | the index of an earlier symbol                                           |
| `"` | string       | a length and that many bytes                                             |
| `I` | ivar         | a string or symbol, a count, then that many (symbol, value) pairs        |
| `[` | array        | a count, then that many values                                           |
| `{` | hash         | a count, then that many (key, value) pairs                               |
| `o` | object       | a class name symbol, a count, then that many (symbol, value) pairs       |
| `u` | user defined | a class name symbol, a length, then that many bytes                      |

Symbols go into a table in the order they first appear, and a symbol link is an index into that
table. Class names and object field names are always symbols or symbol links.

Strings carry no encoding of their own. Ruby wraps them in an ivar whose pairs name it: `E`
with `T` for UTF-8 (`F` for US-ASCII), or `encoding` with a string naming any other encoding.
A bare string is treated as UTF-8. Text that isn't valid in its encoding is decoded with
replacement characters.

Float text may be followed by a NUL byte and mantissa bytes written by old versions of Ruby.
Everything from the NUL on is ignored. `inf` and `-inf` decode to `f64::MAX` and `-f64::MAX`.

User defined payloads are only meaningful to the class that wrote them, so each class needs a
handler in an [`Extensions`](crate::Extensions) table.

# Not supported

Object links (`@`), bignums (`l`), classes (`c`), modules (`m`, `M`), regular expressions (`/`),
structs (`S`), user classes (`C`), extended objects (`e`), hashes with a default value (`}`),
and `marshal_load` objects (`U`) are all rejected as unknown types. RPG Maker VX Ace data
doesn't use them.

*/
