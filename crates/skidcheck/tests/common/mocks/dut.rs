//! `mockall` stand-in for a DUT handle.

use mockall::mock;
use skidcheck::{ClockEdge, DutHandle};

mock! {
    pub Dut {}

    impl DutHandle for Dut {
        fn set_reset(&mut self, asserted: bool);
        fn clock_edge(&mut self, edge: ClockEdge);
        fn set_in_valid(&mut self, valid: bool);
        fn set_in_data(&mut self, data: u64);
        fn set_out_ready(&mut self, ready: bool);
        fn in_valid(&self) -> bool;
        fn in_data(&self) -> u64;
        fn in_ready(&self) -> bool;
        fn out_valid(&self) -> bool;
        fn out_data(&self) -> u64;
        fn out_ready(&self) -> bool;
    }
}

impl MockDut {
    /// A DUT whose every signal reads low and whose setters accept anything.
    pub fn quiet() -> Self {
        let mut dut = Self::new();
        dut.expect_set_reset().return_const(());
        dut.expect_clock_edge().return_const(());
        dut.expect_set_in_valid().return_const(());
        dut.expect_set_in_data().return_const(());
        dut.expect_set_out_ready().return_const(());
        dut.expect_in_valid().return_const(false);
        dut.expect_in_data().return_const(0_u64);
        dut.expect_in_ready().return_const(false);
        dut.expect_out_valid().return_const(false);
        dut.expect_out_data().return_const(0_u64);
        dut.expect_out_ready().return_const(false);
        dut
    }
}
