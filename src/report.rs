use std::io::{self, Write};

use crate::harness::Statistics;

/// Writes one block describing `stats`, followed by a blank line.
///
/// ```text
/// dynamic-unmarshal
///    1398101 iterations      714.3 ns/iter (998.69ms total)
/// allocations: 32505016 (23.2/iter)
/// bytes: 2157312460 (1543.0/iter)
/// ```
pub fn write_statistics<W: Write + ?Sized>(out: &mut W, stats: &Statistics) -> io::Result<()> {
    writeln!(out, "{}", stats.label())?;
    writeln!(
        out,
        "{:>10} iterations {:>10.1} ns/iter ({:.2?} total)",
        stats.iterations(),
        stats.nanos_per_iteration(),
        stats.elapsed()
    )?;
    writeln!(
        out,
        "allocations: {} ({:.1}/iter)",
        stats.allocations(),
        stats.allocations_per_iteration()
    )?;
    writeln!(
        out,
        "bytes: {} ({:.1}/iter)",
        stats.allocated_bytes(),
        stats.bytes_per_iteration()
    )?;
    writeln!(out)
}

/// Writes a block for each entry of `runs`, in order.
pub fn write_all<'a, W, I>(out: &mut W, runs: I) -> io::Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = &'a Statistics>,
{
    for stats in runs {
        write_statistics(out, stats)?;
    }
    out.flush()
}
