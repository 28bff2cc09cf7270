use crate::arrivals::Customer;
use crate::error::SimulationError;
use crate::tellers::TellerPool;
use log::debug;

/// A customer after being served: the assignment is fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServedCustomer {
    customer: Customer,
    teller: usize,
    start: u64,
}

impl ServedCustomer {
    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn id(&self) -> usize {
        self.customer.id
    }

    pub fn arrival(&self) -> u64 {
        self.customer.arrival
    }

    pub fn service(&self) -> u64 {
        self.customer.service
    }

    pub fn teller(&self) -> usize {
        self.teller
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.start + self.customer.service
    }

    /// Time spent in the queue
    pub fn wait(&self) -> u64 {
        self.start - self.customer.arrival
    }

    /// Time spent in the bank, queue plus counter
    pub fn total(&self) -> u64 {
        self.end() - self.customer.arrival
    }
}

/// Serves customers from a single shared FIFO queue with `tellers` tellers
///
/// Each customer, in the order given, goes to whichever teller frees up
/// first and starts at the later of their arrival and that teller's free
/// time. Tellers are interchangeable, so this greedy choice is the same as
/// running the tellers in parallel and dequeuing into the first idle one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentEngine {
    tellers: usize,
}

impl AssignmentEngine {
    pub fn new(tellers: usize) -> Self {
        AssignmentEngine { tellers }
    }

    pub fn tellers(&self) -> usize {
        self.tellers
    }

    pub fn run(&self, customers: &[Customer]) -> Result<Vec<ServedCustomer>, SimulationError> {
        let mut pool = TellerPool::new(self.tellers);
        let mut served = Vec::with_capacity(customers.len());

        for customer in customers {
            let mut teller = pool.take_earliest()?;
            let start = customer.arrival.max(teller.next_available());
            let end = start
                .checked_add(customer.service)
                .ok_or(SimulationError::ClockOverflow {
                    customer: customer.id,
                })?;
            let assigned = ServedCustomer {
                customer: *customer,
                teller: teller.id(),
                start,
            };

            debug!(
                "customer {} (arrived {}s) -> teller {}: {}s..{}s",
                customer.id,
                customer.arrival,
                assigned.teller,
                assigned.start,
                end
            );

            teller.occupy_until(end);
            pool.release(teller);
            served.push(assigned);
        }

        debug_assert_eq!(pool.len(), pool.size());
        Ok(served)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_customers() -> Vec<Customer> {
        vec![
            Customer::new(1, 10, 60),
            Customer::new(2, 20, 60),
            Customer::new(3, 30, 60),
        ]
    }

    #[test]
    fn single_teller_queues_everyone() {
        let served = AssignmentEngine::new(1).run(&three_customers()).unwrap();

        let waits: Vec<u64> = served.iter().map(|c| c.wait()).collect();
        let starts: Vec<u64> = served.iter().map(|c| c.start()).collect();
        assert_eq!(waits, vec![0, 50, 100]);
        assert_eq!(starts, vec![10, 70, 130]);
        assert!(served.iter().all(|c| c.teller() == 1));
    }

    #[test]
    fn enough_tellers_means_no_wait() {
        let served = AssignmentEngine::new(3).run(&three_customers()).unwrap();

        assert!(served.iter().all(|c| c.wait() == 0));
        let tellers: Vec<usize> = served.iter().map(|c| c.teller()).collect();
        assert_eq!(tellers, vec![1, 2, 3]);
    }

    #[test]
    fn tied_free_times_go_to_lower_teller() {
        // both tellers free at 10; the third customer must land on teller 1
        let customers = vec![
            Customer::new(1, 0, 10),
            Customer::new(2, 0, 10),
            Customer::new(3, 5, 10),
            Customer::new(4, 5, 10),
        ];
        let served = AssignmentEngine::new(2).run(&customers).unwrap();

        let tellers: Vec<usize> = served.iter().map(|c| c.teller()).collect();
        assert_eq!(tellers, vec![1, 2, 1, 2]);
        assert_eq!(served[2].start(), 10);
        assert_eq!(served[3].start(), 10);
    }

    #[test]
    fn idle_teller_waits_for_the_customer() {
        let customers = vec![Customer::new(1, 100, 30), Customer::new(2, 500, 30)];
        let served = AssignmentEngine::new(1).run(&customers).unwrap();

        assert_eq!(served[1].start(), 500);
        assert_eq!(served[1].end(), 530);
        assert_eq!(served[1].total(), 30);
    }

    #[test]
    fn fifo_order_is_preserved() {
        let served = AssignmentEngine::new(2).run(&three_customers()).unwrap();
        let ids: Vec<usize> = served.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        // third customer waits for teller 1, free at 70
        assert_eq!(served[2].teller(), 1);
        assert_eq!(served[2].wait(), 40);
    }

    #[test]
    fn no_customers_no_work() {
        assert!(AssignmentEngine::new(4).run(&[]).unwrap().is_empty());
        assert!(AssignmentEngine::new(0).run(&[]).unwrap().is_empty());
    }

    #[test]
    fn finishing_past_the_clock_is_an_error() {
        let customers = vec![
            Customer::new(1, 10, u64::MAX - 20),
            Customer::new(2, 20, 30),
        ];
        let result = AssignmentEngine::new(1).run(&customers);
        assert_eq!(result, Err(SimulationError::ClockOverflow { customer: 2 }));
    }

    #[test]
    fn zero_tellers_is_an_invariant_violation() {
        let result = AssignmentEngine::new(0).run(&three_customers());
        assert_eq!(result, Err(SimulationError::EmptyPool));
    }
}
