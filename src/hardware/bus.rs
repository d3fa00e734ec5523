/// CPU MEMORY BUS
///
/// The linking point between the CPU and everything mapped into its address space. The CPU only
/// ever sees bytes at 16-bit addresses; address decoding, mirroring and mapper banking are the
/// implementor's job.
///
/// Reads take `&mut self` because reads of memory-mapped registers have side effects (PPU status,
/// controller shift registers). Both calls are total: open-bus reads still return some byte.
pub trait Bus {
    fn read(&mut self, address: u16) -> u8;

    fn write(&mut self, address: u16, value: u8);

    /// Polled by the 2A03 after every CPU cycle. A write to `$4014` should make this return the
    /// page to copy into OAM, once.
    fn take_dma_request(&mut self) -> Option<u8> {
        None
    }
}
