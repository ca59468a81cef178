use std::io::{self, BufReader, BufWriter, Read, Write};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::activation::activation::ActivationFunction;
use crate::error::{Error, Result};
use crate::layers::dense::Layer;
use crate::math::matrix::Matrix;
use crate::network::network::Network;

impl Network {
    /// Writes the network to `writer` as plain text.
    ///
    /// The format is line-oriented on write and whitespace-tokenized on read:
    ///
    /// ```text
    /// true                  bias flag
    /// 2                     number of non-input layers
    /// 2 3                   weights of the first non-input layer, rows cols
    /// 0.5 -0.125000 ...     one line per weights row
    /// ...
    /// 1 3                   its bias weights (only when the flag is set)
    /// ...
    /// ```
    ///
    /// The first value of each row is written in shortest round-trip form,
    /// the rest with six decimals. Any reader that splits on whitespace
    /// accepts both.
    pub fn save<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = BufWriter::new(writer);

        writeln!(writer, "{}", self.use_bias)?;
        writeln!(writer, "{}", self.layers.len() - 1)?;

        for layer in &self.layers[1..] {
            let weights = layer
                .weights()
                .ok_or(Error::IllegalState("non-input layer has no weights"))?;
            write_matrix(&mut writer, weights)?;
            if self.use_bias {
                write_matrix(&mut writer, layer.bias()?)?;
            }
        }

        writer.flush()?;
        Ok(())
    }

    /// Reads a network previously written by [`Network::save`].
    ///
    /// Reconstructed networks use the sigmoid activation. The input layer is
    /// rebuilt from the row count of the first weights matrix. Tokens after
    /// the last expected matrix are ignored.
    pub fn load<R: Read>(reader: R) -> Result<Network> {
        let mut content = String::new();
        BufReader::new(reader).read_to_string(&mut content)?;
        let mut tokens = TokenReader::new(&content);

        let use_bias = tokens.next_bool()?;
        let nbr_layers = tokens.next_usize()?;
        if nbr_layers == 0 {
            return Err(Error::Parse {
                position: tokens.position(),
                expected: "at least one layer",
                found: "0".to_string(),
            });
        }

        let mut layers = Vec::with_capacity(nbr_layers + 1);
        for _ in 0..nbr_layers {
            let weights = read_matrix(&mut tokens)?;
            let bias = if use_bias {
                Some(read_matrix(&mut tokens)?)
            } else {
                None
            };
            if layers.is_empty() {
                layers.push(Layer::new(weights.rows(), false, ActivationFunction::Sigmoid));
            }
            layers.push(Layer::from_parts(weights, bias));
        }

        debug!("loaded network: {} weighted layers, bias {}", nbr_layers, use_bias);

        Ok(Network {
            layers,
            use_bias,
            activation: ActivationFunction::Sigmoid,
            rng: StdRng::from_entropy(),
        })
    }
}

fn write_matrix<W: Write>(writer: &mut W, matrix: &Matrix) -> io::Result<()> {
    writeln!(writer, "{} {}", matrix.rows(), matrix.cols())?;
    for r in 0..matrix.rows() {
        for c in 0..matrix.cols() {
            if c == 0 {
                write!(writer, "{}", matrix.get(r, c))?;
            } else {
                write!(writer, " {:.6}", matrix.get(r, c))?;
            }
        }
        writeln!(writer)?;
    }
    Ok(())
}

fn read_matrix(tokens: &mut TokenReader<'_>) -> Result<Matrix> {
    let rows = tokens.next_usize()?;
    let cols = tokens.next_usize()?;

    let mut data = Vec::with_capacity(rows);
    for _ in 0..rows {
        let mut row = Vec::with_capacity(cols);
        for _ in 0..cols {
            row.push(tokens.next_f64()?);
        }
        data.push(row);
    }

    Matrix::from_rows(data)
}

/// Whitespace tokenizer tracking the 1-based position of the last token it
/// handed out, for parse errors.
struct TokenReader<'a> {
    tokens: std::str::SplitWhitespace<'a>,
    position: usize,
}

impl<'a> TokenReader<'a> {
    fn new(content: &'a str) -> TokenReader<'a> {
        TokenReader {
            tokens: content.split_whitespace(),
            position: 0,
        }
    }

    fn position(&self) -> usize {
        self.position
    }

    fn next_token(&mut self, expected: &'static str) -> Result<&'a str> {
        match self.tokens.next() {
            Some(token) => {
                self.position += 1;
                Ok(token)
            }
            None => Err(Error::Parse {
                position: self.position + 1,
                expected,
                found: "end of input".to_string(),
            }),
        }
    }

    fn next_bool(&mut self) -> Result<bool> {
        let token = self.next_token("boolean")?;
        if token.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if token.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(self.mismatch("boolean", token))
        }
    }

    fn next_usize(&mut self) -> Result<usize> {
        let token = self.next_token("integer")?;
        token.parse().map_err(|_| self.mismatch("integer", token))
    }

    fn next_f64(&mut self) -> Result<f64> {
        let token = self.next_token("number")?;
        token.parse().map_err(|_| self.mismatch("number", token))
    }

    fn mismatch(&self, expected: &'static str, found: &str) -> Error {
        Error::Parse {
            position: self.position,
            expected,
            found: found.to_string(),
        }
    }
}
